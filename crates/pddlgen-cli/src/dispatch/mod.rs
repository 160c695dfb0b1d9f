//! Generation dispatch
//!
//! Routes one [`InvocationRequest`] to its domain plugin, names the outputs,
//! runs the generator and writes the stamped results.

mod materialize;

use pddlgen_spec::{
    create_output_dirs, parameter_hash, resolve_targets, DomainDescriptor, DomainSource,
    InvocationRequest, ResolveError, ResolvedTarget,
};
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use crate::plugins::{
    DomainPlugin, DomainRegistry, Invocation, LoadError, PluginError, SubprocessRunner,
};

pub(crate) use materialize::write_outputs;

/// Exit status for usage and configuration errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors that can occur during dispatch
#[derive(Debug)]
pub enum DispatchError {
    /// No domain was given
    MissingDomain,
    /// The domain is not among the discovered ones
    UnknownDomain { domain: String, available: Vec<String> },
    /// The domain's plugin could not be loaded
    Load(LoadError),
    /// The forwarded arguments were rejected by the plugin parser
    Arguments(clap::Error),
    /// The plugin failed to build or run its generator
    Plugin(PluginError),
    /// An output directory could not be created
    Resolve(ResolveError),
    /// A synthesized domain was expected but the plugin produced none
    MissingDomainOutput(String),
    /// An output file could not be written
    Write { path: PathBuf, source: std::io::Error },
    /// Standard output could not be written
    Stdout(std::io::Error),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::MissingDomain => write!(f, "a domain is required"),
            DispatchError::UnknownDomain { domain, available } => write!(
                f,
                "invalid domain '{}' (choose from {})",
                domain,
                available.join(", ")
            ),
            DispatchError::Load(e) => write!(f, "{}", e),
            DispatchError::Arguments(e) => write!(f, "{}", e.to_string().trim_end()),
            DispatchError::Plugin(e) => write!(f, "{}", e),
            DispatchError::Resolve(e) => write!(f, "{}", e),
            DispatchError::MissingDomainOutput(domain) => {
                write!(f, "plugin '{}' produced no domain file", domain)
            }
            DispatchError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            DispatchError::Stdout(e) => write!(f, "Failed to write to standard output: {}", e),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Load(e) => Some(e),
            DispatchError::Arguments(e) => Some(e),
            DispatchError::Plugin(e) => Some(e),
            DispatchError::Resolve(e) => Some(e),
            DispatchError::Write { source, .. } => Some(source),
            DispatchError::Stdout(e) => Some(e),
            _ => None,
        }
    }
}

impl DispatchError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchError::MissingDomain | DispatchError::UnknownDomain { .. } => EXIT_USAGE,
            DispatchError::Arguments(e) if !e.use_stderr() => 0,
            DispatchError::Arguments(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

impl From<LoadError> for DispatchError {
    fn from(e: LoadError) -> Self {
        DispatchError::Load(e)
    }
}

impl From<PluginError> for DispatchError {
    fn from(e: PluginError) -> Self {
        DispatchError::Plugin(e)
    }
}

impl From<ResolveError> for DispatchError {
    fn from(e: ResolveError) -> Self {
        DispatchError::Resolve(e)
    }
}

/// Result of a successful dispatch.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub descriptor: DomainDescriptor,
    pub parameter_hash: String,
    pub target: ResolvedTarget,
}

/// Routes requests to the plugins of one registry.
pub struct Dispatcher<'a> {
    registry: &'a DomainRegistry,
    runner: SubprocessRunner,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher with the default subprocess runner.
    pub fn new(registry: &'a DomainRegistry) -> Self {
        Self::with_runner(registry, SubprocessRunner::new())
    }

    /// Creates a dispatcher with a custom subprocess runner.
    pub fn with_runner(registry: &'a DomainRegistry, runner: SubprocessRunner) -> Self {
        Self { registry, runner }
    }

    /// Loads the plugin for `domain`.
    ///
    /// Unknown names are rejected before any plugin file is read.
    pub fn load(&self, domain: &str) -> Result<Rc<dyn DomainPlugin>, DispatchError> {
        if !self.registry.contains(domain) {
            return Err(DispatchError::UnknownDomain {
                domain: domain.to_string(),
                available: self.registry.names().into_iter().map(String::from).collect(),
            });
        }
        Ok(self.registry.load(domain)?)
    }

    /// Generates one problem (and domain file, where applicable).
    ///
    /// Produced content goes to files or to `out`; every file written is
    /// announced on `out` by its absolute path. Nothing is written unless
    /// every generator run succeeded.
    pub fn dispatch(
        &self,
        request: &InvocationRequest,
        out: &mut dyn Write,
    ) -> Result<DispatchOutcome, DispatchError> {
        let plugin = self.load(&request.domain)?;
        let params = plugin.parse(&request.rest).map_err(DispatchError::Arguments)?;

        let vector = plugin.parameter_vector(&params, request.seed)?;
        let hash = parameter_hash(plugin.name(), &vector);
        let source = plugin.domain_source();
        let target = resolve_targets(request, &source, &hash);
        tracing::debug!(
            domain = plugin.name(),
            hash = %hash,
            problem = %target.problem,
            "resolved output targets"
        );

        if source == DomainSource::Absent && request.output_domain.is_some() {
            tracing::warn!(
                domain = plugin.name(),
                "domain has no domain file; ignoring --output-domain"
            );
        }

        let invocation = Invocation {
            request,
            runner: &self.runner,
        };
        let generation = plugin.main(&invocation, &params)?;

        create_output_dirs(request, &target)?;
        let parameters = params.with_seed(request.seed);
        write_outputs(
            plugin.name(),
            &target,
            &generation,
            &parameters,
            &request.separator,
            out,
        )?;

        Ok(DispatchOutcome {
            descriptor: DomainDescriptor::new(plugin.name(), source),
            parameter_hash: hash,
            target,
        })
    }
}
