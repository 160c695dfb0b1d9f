//! Runtime configuration.

use std::path::{Path, PathBuf};

use crate::cli_args::Cli;

/// Environment variable overriding the domains root.
pub const ROOT_ENV: &str = "PDDL_GENERATORS_ROOT";

/// Domain that must be present in the default domains root.
pub const REFERENCE_DOMAIN: &str = "visitall";

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory whose subdirectories are the domains.
    pub domains_root: PathBuf,
    /// Domain that discovery must find, if any.
    pub reference_domain: Option<String>,
    /// Verbose logging requested.
    pub debug: bool,
}

impl Config {
    /// Configuration for an explicitly chosen root.
    ///
    /// Explicit roots are not checked for the reference domain.
    pub fn new(domains_root: impl Into<PathBuf>) -> Self {
        Self {
            domains_root: domains_root.into(),
            reference_domain: None,
            debug: false,
        }
    }

    /// Resolves the configuration from parsed arguments and the environment.
    ///
    /// The root is taken from `--domains-root`, then from
    /// `PDDL_GENERATORS_ROOT`, then from the first existing default
    /// location (see [`default_search_paths`]).
    pub fn from_cli(cli: &Cli) -> Self {
        let env_root = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty());
        let mut config = match (&cli.domains_root, env_root) {
            (Some(root), _) => Self::new(root),
            (None, Some(root)) => Self::new(root),
            (None, None) => Self::with_default_root(),
        };
        config.debug = cli.debug;
        config
    }

    /// Configuration using the first existing default location.
    pub fn with_default_root() -> Self {
        let paths = default_search_paths();
        let root = paths
            .iter()
            .find(|p| p.is_dir())
            .or(paths.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from("domains"));
        tracing::debug!(root = %root.display(), "using default domains root");

        Self {
            domains_root: root,
            reference_domain: Some(REFERENCE_DOMAIN.to_string()),
            debug: false,
        }
    }
}

/// Default domains root candidates, in priority order.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Current directory domains/
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("domains"));
    }

    // 2. Next to the executable, and the install prefix share directory
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
    {
        paths.push(exe_dir.join("domains"));
        paths.push(exe_dir.join("../share/pddl-generators/domains"));
    }

    // 3. User data directory
    if let Some(data_dir) = dirs::data_dir() {
        paths.push(data_dir.join("pddl-generators").join("domains"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_root_has_no_reference_domain() {
        let config = Config::new("/opt/domains");
        assert_eq!(config.domains_root, PathBuf::from("/opt/domains"));
        assert_eq!(config.reference_domain, None);
    }

    #[test]
    fn test_default_root_requires_reference_domain() {
        let config = Config::with_default_root();
        assert_eq!(config.reference_domain.as_deref(), Some(REFERENCE_DOMAIN));
    }

    #[test]
    fn test_search_paths_start_with_cwd() {
        let paths = default_search_paths();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(paths.first(), Some(&cwd.join("domains")));
    }
}
