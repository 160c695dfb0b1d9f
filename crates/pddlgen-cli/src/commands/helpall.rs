//! `--helpall`: prints every domain's help text.
//!
//! Failures are isolated per domain: a domain that cannot be loaded gets a
//! one-line diagnostic in place of its help and the listing continues.

use anyhow::Result;
use std::io::Write;
use std::process::ExitCode;

use crate::plugins::DomainRegistry;

const RULE: &str = "################################";

/// Banner printed before each domain.
pub fn banner(domain: &str) -> String {
    format!("\n\n{rule} {domain} {rule}\n", rule = RULE, domain = domain)
}

/// Run the helpall command
pub fn run(registry: &DomainRegistry, out: &mut dyn Write) -> Result<ExitCode> {
    for name in registry.names() {
        writeln!(out, "{}", banner(name))?;
        match registry.load(name) {
            Ok(plugin) => {
                let help = plugin.parser().render_help();
                writeln!(out, "{}", help.to_string().trim_end())?;
            }
            Err(e) => {
                tracing::warn!(domain = name, error = %e, "skipping domain");
                writeln!(out, "{}", e)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner() {
        assert_eq!(
            banner("visitall"),
            "\n\n################################ visitall ################################\n"
        );
    }
}
