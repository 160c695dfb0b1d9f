//! Command-line argument definitions.
//!
//! The `#[derive(Parser)]` type is defined here, keeping `main.rs` focused
//! on setup and dispatch.

use clap::Parser;
use pddlgen_spec::request::{DEFAULT_OUTPUT_DIRECTORY, DEFAULT_SEED, DEFAULT_SEPARATOR};
use pddlgen_spec::{InvocationRequest, OutputOverride};
use std::path::PathBuf;

const ABOUT: &str = "Generates a problem file for a given domain and a set of hyperparameters.";

const LONG_ABOUT: &str = "\
Generates a problem file for a given domain and a set of hyperparameters. Depending on the
domain, it also produces a domain file (e.g., ADL domain compiled to STRIPS). In the default
behavior, it writes the file(s) under DIRNAME, then prints the absolute pathname of the problem
file and of the domain file on two separate lines. The domain file is either generated alongside
the problem or a fixed PDDL file shared by all problems of the domain. When --output STDOUT is
given, the problem is printed to standard output instead (see --output).

Arguments after the domain name are forwarded to the domain. Use `-- --help` after the domain
name to see what a domain accepts, or --helpall to see every domain at once.";

/// PDDL problem generators behind one uniform command line
#[derive(Debug, Parser)]
#[command(name = "pddl-generators")]
#[command(version, about = ABOUT, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Domain name (see --list)
    pub domain: Option<String>,

    /// Directory to store the generated files; created (with parents) before any output
    #[arg(
        short = 'd',
        long,
        value_name = "DIRNAME",
        default_value = DEFAULT_OUTPUT_DIRECTORY
    )]
    pub output_directory: PathBuf,

    /// Problem file, overriding the default {hash}.pddl name
    #[arg(
        short,
        long,
        value_name = "FILENAME1",
        long_help = "\
Problem file, overriding the default name handling.
An absolute path is used as is; DIRNAME is ignored. A relative path is taken relative to DIRNAME.

If not given, the file is stored under DIRNAME as {hash}.pddl, where {hash} is a hash of the
arguments given to the generator. A domain file generated alongside the problem is written next
to it as {basename}-domain.pddl; see --output-domain.

If the argument is STDOUT, the problem is written to standard output. For a domain that also
generates a domain file, the two are separated by the line given with --separator.

Every output starts with a block of ';; ' comment lines recording how it was generated: a first
line 'pddl-generators:', then 'command:' (the generator command line), 'dict:' (the parsed
arguments), 'date:' (the creation time), and a last line 'end:'."
    )]
    pub output: Option<OutputOverride>,

    /// Domain file, overriding the default name handling
    #[arg(
        long,
        value_name = "FILENAME2",
        long_help = "\
Domain file, overriding the default name handling.
An absolute path is used as is; DIRNAME is ignored. A relative path is taken relative to DIRNAME.

If missing and the generator produces a new domain file for each problem, it defaults to
{basename}-domain.pddl where {basename} is the basename of FILENAME1.

If missing and the domain comes with a shared domain file, the path of that shared file is
printed. If given for such a domain, the shared file is copied to the specified location."
    )]
    pub output_domain: Option<OutputOverride>,

    /// Line separating problem and domain when both go to STDOUT
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Random seed
    #[arg(short, long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    pub seed: i64,

    /// Print the help messages of all domains
    #[arg(long)]
    pub helpall: bool,

    /// List available domains
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// Directory holding the domain plugins [env: PDDL_GENERATORS_ROOT]
    #[arg(long, value_name = "DIR")]
    pub domains_root: Option<PathBuf>,

    /// Remaining arguments, forwarded to the domain
    #[arg(num_args = 0.., allow_negative_numbers = true, value_name = "REST")]
    pub rest: Vec<String>,
}

impl Cli {
    /// The generation request, if a domain was given.
    pub fn to_request(&self) -> Option<InvocationRequest> {
        let domain = self.domain.as_ref()?;
        let mut request = InvocationRequest::new(domain)
            .with_output_directory(&self.output_directory)
            .with_separator(&self.separator)
            .with_seed(self.seed)
            .with_rest(&self.rest);
        if let Some(output) = &self.output {
            request = request.with_output(output.clone());
        }
        if let Some(output) = &self.output_domain {
            request = request.with_output_domain(output.clone());
        }
        Some(request)
    }
}
