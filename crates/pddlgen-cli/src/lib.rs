//! pddl-generators CLI library.
//!
//! This crate provides the core of the `pddl-generators` command: domain
//! discovery, plugin loading, generator subprocesses, and the dispatcher
//! that names, stamps and writes generated problems.

pub mod cli_args;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod plugins;

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use cli_args::Cli;
use config::Config;
use dispatch::{DispatchError, EXIT_FAILURE};

/// Runs the command for already parsed arguments.
///
/// Generated content and written paths go to `out`; diagnostics go to `err`.
pub fn run(cli: Cli, out: &mut dyn Write, err: &mut dyn Write) -> ExitCode {
    match try_run(cli, out, err) {
        Ok(code) => code,
        Err(e) => {
            let _ = commands::report_error(err, format!("{:#}", e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Parses `args` (program name first) and runs the command.
pub fn run_from_args<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => run(cli, out, err),
        Err(e) => {
            let rendered = e.render();
            let _ = if e.use_stderr() {
                write!(err, "{}", rendered)
            } else {
                write!(out, "{}", rendered)
            };
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(EXIT_FAILURE))
        }
    }
}

fn try_run(cli: Cli, out: &mut dyn Write, err: &mut dyn Write) -> anyhow::Result<ExitCode> {
    let config = Config::from_cli(&cli);
    tracing::debug!(root = %config.domains_root.display(), "configuration resolved");
    let registry = commands::open_registry(&config)?;

    if cli.list {
        return commands::list::run(&registry, out);
    }
    if cli.helpall {
        return commands::helpall::run(&registry, out);
    }

    match cli.to_request() {
        Some(request) => commands::generate::run(&registry, &request, out, err),
        None => commands::usage_error(
            err,
            ErrorKind::MissingRequiredArgument,
            DispatchError::MissingDomain,
        ),
    }
}
