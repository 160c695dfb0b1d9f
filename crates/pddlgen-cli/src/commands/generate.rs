//! Generate command implementation
//!
//! Dispatches one request to its domain plugin and reports the outcome.

use anyhow::Result;
use clap::error::ErrorKind;
use pddlgen_spec::InvocationRequest;
use std::io::Write;
use std::process::ExitCode;

use super::{report_error, usage_error};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::plugins::DomainRegistry;

/// Run the generate command
///
/// # Arguments
/// * `registry` - Discovered domains
/// * `request` - The generation request
/// * `out` - Receives generated content and written paths
/// * `err` - Receives diagnostics
///
/// # Returns
/// Exit code: 0 success, 2 usage error, 1 any other failure
pub fn run(
    registry: &DomainRegistry,
    request: &InvocationRequest,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ExitCode> {
    let dispatcher = Dispatcher::new(registry);

    match dispatcher.dispatch(request, out) {
        Ok(outcome) => {
            tracing::debug!(
                domain = %outcome.descriptor.name,
                hash = %outcome.parameter_hash,
                "generation complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(DispatchError::Arguments(e)) => {
            // Plugin help goes to stdout, plugin usage errors to stderr.
            let rendered = e.render();
            if e.use_stderr() {
                write!(err, "{}", rendered)?;
            } else {
                write!(out, "{}", rendered)?;
            }
            Ok(ExitCode::from(DispatchError::Arguments(e).exit_code()))
        }
        Err(e @ DispatchError::UnknownDomain { .. }) => {
            usage_error(err, ErrorKind::InvalidValue, &e)
        }
        Err(e @ DispatchError::MissingDomain) => {
            usage_error(err, ErrorKind::MissingRequiredArgument, &e)
        }
        Err(e) => {
            report_error(err, &e)?;
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
