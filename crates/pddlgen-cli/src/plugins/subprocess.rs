//! Subprocess-based generator runner.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;
use thiserror::Error;

/// Configuration for the subprocess runner.
#[derive(Debug, Clone, Default)]
pub struct SubprocessConfig {
    /// Whether to capture stderr instead of passing it through.
    pub capture_stderr: bool,
}

/// One fully expanded generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCall {
    /// Resolved executable.
    pub program: PathBuf,
    /// Arguments after template expansion.
    pub args: Vec<String>,
    /// Extra environment variables.
    pub env: BTreeMap<String, String>,
}

impl GeneratorCall {
    /// Creates a call with no extra environment.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: BTreeMap::new(),
        }
    }

    /// Adds environment variables.
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// The argument vector, program first.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Shell-quoted command line, recorded in the metadata block.
    pub fn command_line(&self) -> String {
        let argv = self.argv();
        shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
    }
}

/// Output of a successful generator run.
#[derive(Debug)]
pub struct Captured {
    /// Everything the generator wrote to stdout.
    pub stdout: Vec<u8>,
    /// Captured stderr (if configured).
    pub stderr: Option<String>,
}

/// Errors from running a generator.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("generator executable '{name}' not found in {} or on PATH", .dir.display())]
    ExecutableNotFound { name: String, dir: PathBuf },

    #[error("failed to spawn '{}': {source}", .program.display())]
    SpawnFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("generator exited with status {code}: {command}{}", stderr_suffix(.stderr))]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: Option<String>,
    },

    #[error("generator was terminated by a signal: {command}")]
    Terminated { command: String },
}

fn stderr_suffix(stderr: &Option<String>) -> String {
    match stderr.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => format!("\n{}", s),
        _ => String::new(),
    }
}

/// Runner for generator subprocesses.
///
/// Stdin is closed, stdout is captured in full, and stderr is passed
/// through unless [`SubprocessConfig::capture_stderr`] is set. There is
/// no timeout; the runner waits for the generator to finish.
#[derive(Debug, Clone, Default)]
pub struct SubprocessRunner {
    config: SubprocessConfig,
}

impl SubprocessRunner {
    /// Creates a new subprocess runner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new subprocess runner with custom configuration.
    pub fn with_config(config: SubprocessConfig) -> Self {
        Self { config }
    }

    /// Runs a generator and captures its stdout.
    pub fn run(&self, call: &GeneratorCall) -> Result<Captured, RunError> {
        let mut cmd = Command::new(&call.program);
        cmd.args(&call.args);
        cmd.envs(&call.env);

        // Configure I/O
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        if self.config.capture_stderr {
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stderr(Stdio::inherit());
        }

        tracing::debug!(command = %call.command_line(), "running generator");
        let start = Instant::now();
        let output = cmd.output().map_err(|source| RunError::SpawnFailed {
            program: call.program.clone(),
            source,
        })?;
        let elapsed = start.elapsed();

        let stderr = self
            .config
            .capture_stderr
            .then(|| String::from_utf8_lossy(&output.stderr).into_owned());

        if !output.status.success() {
            return Err(match output.status.code() {
                Some(code) => RunError::NonZeroExit {
                    command: call.command_line(),
                    code,
                    stderr,
                },
                None => RunError::Terminated {
                    command: call.command_line(),
                },
            });
        }

        tracing::debug!(
            bytes = output.stdout.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "generator finished"
        );

        Ok(Captured {
            stdout: output.stdout,
            stderr,
        })
    }
}
