//! `--list`: prints the discovered domain names.

use anyhow::Result;
use std::io::Write;
use std::process::ExitCode;

use crate::plugins::DomainRegistry;

/// Run the list command
pub fn run(registry: &DomainRegistry, out: &mut dyn Write) -> Result<ExitCode> {
    for name in registry.names() {
        writeln!(out, "{}", name)?;
    }
    Ok(ExitCode::SUCCESS)
}
