//! Test harness utilities for running the CLI and inspecting outputs.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::TempDir;

use crate::fixtures;

/// Result of running the pddl-generators CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    fn new(code: ExitCode, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        let exit_code = (0..=u8::MAX)
            .find(|c| ExitCode::from(*c) == code)
            .map(i32::from)
            .unwrap_or(-1);
        Self {
            success: exit_code == 0,
            exit_code,
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed with the given exit code.
    pub fn assert_exit_code(&self, expected: i32) {
        assert_eq!(
            self.exit_code, expected,
            "Unexpected exit code.\nstdout: {}\nstderr: {}",
            self.stdout, self.stderr
        );
    }

    /// Standard output split into lines.
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// A test harness owning a scratch directory with a domains root.
pub struct TestHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with an empty domains root.
    pub fn new() -> Self {
        let work_dir = TempDir::new().expect("Failed to create work dir");
        fs::create_dir_all(work_dir.path().join("domains")).expect("Failed to create domains root");
        Self { work_dir }
    }

    /// Create a harness holding the fake visit-all plugin.
    pub fn with_visitall() -> Self {
        let harness = Self::new();
        harness.add_domain("visitall", &fixtures::visitall_manifest());
        harness.add_file("visitall", "README.txt", "Visit every cell of a grid.\n");
        harness.add_file("visitall", "domain.pddl", fixtures::VISITALL_DOMAIN);
        harness.add_script("visitall", "grid", fixtures::GRID_SCRIPT);
        harness
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// The domains root passed to every run.
    pub fn domains_root(&self) -> PathBuf {
        self.path().join("domains")
    }

    /// Default output directory used by [`TestHarness::generate`].
    pub fn out_dir(&self) -> PathBuf {
        self.path().join("output")
    }

    /// Creates a domain directory with the given manifest.
    pub fn add_domain(&self, name: &str, manifest: &serde_json::Value) -> PathBuf {
        let dir = self.add_bare_domain(name);
        let text = serde_json::to_string_pretty(manifest).expect("Failed to serialize manifest");
        fs::write(dir.join("plugin.json"), text).expect("Failed to write manifest");
        dir
    }

    /// Creates a domain directory without a manifest.
    pub fn add_bare_domain(&self, name: &str) -> PathBuf {
        let dir = self.domains_root().join(name);
        fs::create_dir_all(&dir).expect("Failed to create domain dir");
        dir
    }

    /// Writes a file inside a domain directory.
    pub fn add_file(&self, domain: &str, rel_path: &str, content: &str) -> PathBuf {
        let path = self.domains_root().join(domain).join(rel_path);
        fs::write(&path, content).expect("Failed to write domain file");
        path
    }

    /// Writes an executable `/bin/sh` script inside a domain directory.
    pub fn add_script(&self, domain: &str, name: &str, body: &str) -> PathBuf {
        let path = self.add_file(domain, name, &format!("#!/bin/sh\n{}", body));
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to make script executable");
        }
        path
    }

    /// Run the CLI with the given arguments against this harness's root.
    ///
    /// Note: This runs the CLI as a library call, not as a subprocess; the
    /// generators it dispatches to are still real subprocesses.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        let root = self.domains_root();
        let mut argv: Vec<String> = vec![
            "pddl-generators".to_string(),
            "--domains-root".to_string(),
            root.to_string_lossy().into_owned(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = pddlgen_cli::run_from_args(argv, &mut stdout, &mut stderr);
        CliResult::new(code, stdout, stderr)
    }

    /// Generate into [`TestHarness::out_dir`].
    pub fn generate(&self, domain: &str, extra: &[&str]) -> CliResult {
        let out_dir = self.out_dir();
        let mut args = vec!["-d", out_dir.to_str().expect("non-UTF-8 temp dir"), domain];
        args.extend_from_slice(extra);
        self.run_cli(&args)
    }

    /// Files currently in the output directory, sorted by name.
    pub fn output_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = match fs::read_dir(self.out_dir()) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(_) => Vec::new(),
        };
        files.sort();
        files
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops the `;; date:` line, the only field that differs between runs.
pub fn without_date(content: &str) -> String {
    content
        .lines()
        .filter(|l| !l.starts_with(";; date:"))
        .collect::<Vec<_>>()
        .join("\n")
}
