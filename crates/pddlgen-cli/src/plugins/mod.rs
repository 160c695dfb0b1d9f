//! Domain plugins.
//!
//! A domain plugin turns forwarded command-line tokens into generator
//! output. Plugins are discovered as subdirectories of the domains root and
//! loaded lazily from their `plugin.json` manifest.
//!
//! # Dispatch protocol
//!
//! 1. **Parse**: the plugin's parser turns `rest` into a [`ParamSet`]
//! 2. **Vector**: the plugin expands its problem-run argument templates;
//!    this vector is what the default output name is hashed from
//! 3. **Main**: the plugin runs its generator(s) and returns the captured
//!    output without touching the filesystem
//!
//! The dispatcher stamps and writes the captured output afterwards, so a
//! failing generator never leaves a file behind.

mod manifest_plugin;
mod parser;
mod registry;
mod subprocess;

pub use manifest_plugin::ManifestPlugin;
pub use parser::{build_command, parse_params};
pub use registry::{DomainRegistry, RegistryError, RESERVED_MARKER};
pub use subprocess::{Captured, GeneratorCall, RunError, SubprocessConfig, SubprocessRunner};

use pddlgen_spec::plugin::{ContractError, TemplateError};
use pddlgen_spec::{DomainSource, InvocationRequest, ParamSet};
use std::path::PathBuf;
use thiserror::Error;

/// A loaded domain plugin.
pub trait DomainPlugin {
    /// Domain name (the directory name).
    fn name(&self) -> &str;

    /// Argument parser; also renders the plugin's help text.
    fn parser(&self) -> clap::Command;

    /// Parses forwarded tokens into typed parameters.
    fn parse(&self, rest: &[String]) -> Result<ParamSet, clap::Error>;

    /// Where this plugin's domain file comes from.
    fn domain_source(&self) -> DomainSource;

    /// Generator arguments of the problem run, excluding the executable.
    fn parameter_vector(&self, params: &ParamSet, seed: i64) -> Result<Vec<String>, PluginError>;

    /// Runs the generator and returns its captured output.
    fn main(&self, invocation: &Invocation<'_>, params: &ParamSet)
        -> Result<Generation, PluginError>;
}

/// Everything a plugin's `main` gets besides its parameters.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub request: &'a InvocationRequest,
    pub runner: &'a SubprocessRunner,
}

/// Captured output of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Shell-quoted command line that produced the content.
    pub command: String,
    /// Raw generator output.
    pub content: Vec<u8>,
}

/// Output of a plugin's `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub problem: Artifact,
    /// Present only for plugins that synthesize a domain file per run.
    pub domain: Option<Artifact>,
}

/// Errors raised while loading a plugin.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The directory exists but holds no manifest.
    #[error(
        "domain '{domain}' has no plugin.json in {}; probably the domain is not supported by this front end yet",
        .dir.display()
    )]
    NotSupported { domain: String, dir: PathBuf },

    /// The manifest violates the plugin contract.
    #[error("plugin for domain '{domain}': {source}")]
    Contract {
        domain: String,
        #[source]
        source: ContractError,
    },

    /// A plugin file could not be read.
    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// The name was not found during discovery.
    #[error("domain '{0}' was not discovered")]
    NotDiscovered(String),
}

/// Errors raised while a plugin builds or runs its generator calls.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Run(#[from] RunError),
}
