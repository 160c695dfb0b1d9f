//! The invocation request built from the top-level command line.

use std::path::PathBuf;
use std::str::FromStr;

/// Literal override value that routes a target to standard output.
pub const STDOUT_SENTINEL: &str = "STDOUT";

/// Default `--output-directory`.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";

/// Default `--separator` line between problem and domain on standard output.
pub const DEFAULT_SEPARATOR: &str = ";; domain file";

/// Default `--seed`.
pub const DEFAULT_SEED: i64 = 42;

/// An explicit `--output` / `--output-domain` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOverride {
    /// The literal `STDOUT`.
    Stdout,
    /// A file path, absolute or relative to the output directory.
    Path(PathBuf),
}

impl OutputOverride {
    /// Interprets a command-line value.
    pub fn parse(value: &str) -> Self {
        if value == STDOUT_SENTINEL {
            OutputOverride::Stdout
        } else {
            OutputOverride::Path(PathBuf::from(value))
        }
    }
}

impl FromStr for OutputOverride {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OutputOverride::parse(s))
    }
}

/// One generation request. Created from command-line input, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Selected domain name.
    pub domain: String,
    /// Directory for default-named and relative outputs.
    pub output_directory: PathBuf,
    /// Explicit problem-file target.
    pub output: Option<OutputOverride>,
    /// Explicit domain-file target.
    pub output_domain: Option<OutputOverride>,
    /// Line written between problem and domain content on standard output.
    pub separator: String,
    /// Random seed handed to the generator.
    pub seed: i64,
    /// Arguments forwarded verbatim to the plugin parser.
    pub rest: Vec<String>,
}

impl InvocationRequest {
    /// Creates a request with the command-line defaults.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            output: None,
            output_domain: None,
            separator: DEFAULT_SEPARATOR.to_string(),
            seed: DEFAULT_SEED,
            rest: Vec::new(),
        }
    }

    /// Sets the output directory.
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = dir.into();
        self
    }

    /// Sets the problem-file override.
    pub fn with_output(mut self, output: OutputOverride) -> Self {
        self.output = Some(output);
        self
    }

    /// Sets the domain-file override.
    pub fn with_output_domain(mut self, output: OutputOverride) -> Self {
        self.output_domain = Some(output);
        self
    }

    /// Sets the separator line.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the plugin arguments.
    pub fn with_rest<I, S>(mut self, rest: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rest = rest.into_iter().map(Into::into).collect();
        self
    }
}
