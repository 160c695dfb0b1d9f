//! CLI command implementations

pub mod generate;
pub mod helpall;
pub mod list;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::CommandFactory;
use colored::Colorize;
use std::fmt::Display;
use std::io::Write;
use std::process::ExitCode;

use crate::cli_args::Cli;
use crate::config::Config;
use crate::dispatch::EXIT_USAGE;
use crate::plugins::DomainRegistry;

/// Discovers the domains under the configured root.
pub fn open_registry(config: &Config) -> Result<DomainRegistry> {
    let registry = DomainRegistry::discover(&config.domains_root)
        .context("could not discover domains (set --domains-root or PDDL_GENERATORS_ROOT)")?;
    if let Some(reference) = &config.reference_domain {
        registry.require(reference)?;
    }
    Ok(registry)
}

/// Prints `error: <message>` the way `main` reports failures.
pub fn report_error(err: &mut dyn Write, message: impl Display) -> Result<()> {
    writeln!(err, "{}: {}", "error".red(), message)?;
    Ok(())
}

/// Prints a usage error with the top-level usage line.
pub(crate) fn usage_error(
    err: &mut dyn Write,
    kind: ErrorKind,
    message: impl Display,
) -> Result<ExitCode> {
    let error = Cli::command().error(kind, message);
    write!(err, "{}", error.render())?;
    Ok(ExitCode::from(EXIT_USAGE))
}
