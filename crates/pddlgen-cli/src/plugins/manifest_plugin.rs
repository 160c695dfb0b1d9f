//! Plugins backed by a `plugin.json` manifest and an external generator.

use pddlgen_spec::plugin::{template, PluginManifest, TemplateError, MANIFEST_FILE};
use pddlgen_spec::{DomainSource, ParamSet};
use std::path::{Path, PathBuf};

use super::parser::{build_command, parse_params};
use super::{
    Artifact, DomainPlugin, Generation, GeneratorCall, Invocation, LoadError, PluginError,
    RunError,
};

/// A domain plugin described by a manifest file.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    name: String,
    dir: PathBuf,
    manifest: PluginManifest,
    description: Option<String>,
}

impl ManifestPlugin {
    /// Loads the manifest in `dir`.
    ///
    /// A directory without a manifest is reported as not supported; a
    /// manifest that breaks the plugin contract is rejected here, before any
    /// generator could run.
    pub fn load(name: &str, dir: &Path) -> Result<Self, LoadError> {
        let path = dir.join(MANIFEST_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotSupported {
                    domain: name.to_string(),
                    dir: dir.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(LoadError::Io {
                    path,
                    message: e.to_string(),
                });
            }
        };

        let manifest = PluginManifest::from_json(&text).map_err(|source| LoadError::Contract {
            domain: name.to_string(),
            source,
        })?;
        Self::from_manifest(name, dir, manifest)
    }

    /// Wraps an already validated manifest.
    pub fn from_manifest(
        name: &str,
        dir: &Path,
        manifest: PluginManifest,
    ) -> Result<Self, LoadError> {
        let description = match (
            &manifest.parser.description,
            &manifest.parser.description_file,
        ) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(file)) => {
                let path = dir.join(file);
                let text = std::fs::read_to_string(&path).map_err(|e| LoadError::Io {
                    path,
                    message: e.to_string(),
                })?;
                Some(text)
            }
            (None, None) => None,
        };

        Ok(Self {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            manifest,
            description,
        })
    }

    /// Resolves the generator executable.
    ///
    /// Names with a path separator, and names present in the plugin
    /// directory, resolve against the plugin directory. Anything else is
    /// looked up on `PATH`.
    pub fn resolve_executable(&self) -> Result<PathBuf, RunError> {
        let name = &self.manifest.main.executable;
        let local = self.dir.join(name);
        let has_separator = Path::new(name).components().count() > 1;

        if local.is_file() {
            return Ok(local);
        }
        if !has_separator {
            if let Ok(found) = which::which(name) {
                return Ok(found);
            }
        }

        Err(RunError::ExecutableNotFound {
            name: name.clone(),
            dir: self.dir.clone(),
        })
    }

    fn expand_all(
        &self,
        templates: &[String],
        params: &ParamSet,
        seed: i64,
    ) -> Result<Vec<String>, TemplateError> {
        let plugin_dir = self.dir.to_string_lossy();
        let lookup = |name: &str| match name {
            "seed" => Some(seed.to_string()),
            "plugin_dir" => Some(plugin_dir.to_string()),
            _ => params.get(name).map(ToString::to_string),
        };
        templates
            .iter()
            .map(|t| template::expand(t, &lookup))
            .collect()
    }

    fn call(&self, program: &Path, args: Vec<String>) -> GeneratorCall {
        GeneratorCall::new(program, args).with_env(self.manifest.main.env.clone())
    }
}

impl DomainPlugin for ManifestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn parser(&self) -> clap::Command {
        build_command(&self.name, &self.manifest.parser, self.description.as_deref())
    }

    fn parse(&self, rest: &[String]) -> Result<ParamSet, clap::Error> {
        parse_params(self.parser(), &self.manifest.parser, rest)
    }

    fn domain_source(&self) -> DomainSource {
        self.manifest.domain_source(&self.dir)
    }

    fn parameter_vector(&self, params: &ParamSet, seed: i64) -> Result<Vec<String>, PluginError> {
        Ok(self.expand_all(&self.manifest.main.args, params, seed)?)
    }

    fn main(
        &self,
        invocation: &Invocation<'_>,
        params: &ParamSet,
    ) -> Result<Generation, PluginError> {
        let seed = invocation.request.seed;
        let program = self.resolve_executable()?;

        let call = self.call(&program, self.parameter_vector(params, seed)?);
        let captured = invocation.runner.run(&call)?;
        let problem = Artifact {
            command: call.command_line(),
            content: captured.stdout,
        };

        // Second run only when the domain file is synthesized.
        let domain = match &self.manifest.main.domain_args {
            Some(templates) => {
                let call = self.call(&program, self.expand_all(templates, params, seed)?);
                let captured = invocation.runner.run(&call)?;
                Some(Artifact {
                    command: call.command_line(),
                    content: captured.stdout,
                })
            }
            None => None,
        };

        Ok(Generation { problem, domain })
    }
}
