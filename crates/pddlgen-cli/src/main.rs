//! pddl-generators - uniform command line for PDDL problem generators
//!
//! Parses the top-level arguments, sets up logging, and hands over to the
//! library.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pddlgen_cli::cli_args::Cli;

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    pddlgen_cli::run(cli, &mut stdout.lock(), &mut stderr.lock())
}
