//! Output path resolution.
//!
//! Rules, in priority order:
//!
//! 1. An absolute override is used verbatim; the output directory is ignored.
//! 2. A relative override is joined under the output directory.
//! 3. Without a problem override the file is `{output_dir}/{hash}.pddl`.
//! 4. Without a domain override, a synthesized domain goes next to the problem
//!    file as `{stem}-domain.pddl` (or to standard output if the problem does).
//! 5. Without a domain override, a shared domain file stays where it is; with
//!    one, the shared file is copied to the override location.
//! 6. `STDOUT` routes a target to standard output.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::DomainSource;
use crate::error::ResolveError;
use crate::request::{InvocationRequest, OutputOverride};

/// Where an artifact is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Returns the file path, if this is a file destination.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Destination::Stdout => None,
            Destination::File(path) => Some(path),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str(crate::request::STDOUT_SENTINEL),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What happens to the domain file for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainTarget {
    /// The plugin has no domain file; nothing is written.
    Absent,
    /// The shared domain file is referenced in place; nothing is written.
    Shared(PathBuf),
    /// The shared domain file is copied byte-for-byte to `destination`.
    Copy {
        source: PathBuf,
        destination: Destination,
    },
    /// The generated domain content is written to the destination.
    Generate(Destination),
}

impl DomainTarget {
    /// Returns the destination this invocation writes to, if any.
    fn written(&self) -> Option<&Destination> {
        match self {
            DomainTarget::Copy { destination, .. } | DomainTarget::Generate(destination) => {
                Some(destination)
            }
            DomainTarget::Absent | DomainTarget::Shared(_) => None,
        }
    }
}

/// Final destinations of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub problem: Destination,
    pub domain: DomainTarget,
}

impl ResolvedTarget {
    /// Files this invocation will create or overwrite.
    pub fn written_files(&self) -> Vec<&Path> {
        std::iter::once(&self.problem)
            .chain(self.domain.written())
            .filter_map(Destination::path)
            .collect()
    }
}

/// Resolves the problem and domain destinations for a request.
///
/// # Arguments
/// * `request` - The invocation request (output directory and overrides)
/// * `source` - Where the selected domain's domain file comes from
/// * `parameter_hash` - Hash of the generator parameter vector, see [`crate::hash`]
pub fn resolve_targets(
    request: &InvocationRequest,
    source: &DomainSource,
    parameter_hash: &str,
) -> ResolvedTarget {
    let dir = &request.output_directory;

    let problem = match &request.output {
        Some(o) => resolve_override(dir, o),
        None => Destination::File(dir.join(format!("{}.pddl", parameter_hash))),
    };

    let domain = match source {
        DomainSource::Absent => DomainTarget::Absent,
        DomainSource::Synthesized => {
            let destination = match (&request.output_domain, &problem) {
                (Some(o), _) => resolve_override(dir, o),
                (None, Destination::Stdout) => Destination::Stdout,
                (None, Destination::File(path)) => Destination::File(domain_file_path(path)),
            };
            DomainTarget::Generate(destination)
        }
        DomainSource::Shared(fixed) => match &request.output_domain {
            Some(o) => DomainTarget::Copy {
                source: fixed.clone(),
                destination: resolve_override(dir, o),
            },
            None => DomainTarget::Shared(fixed.clone()),
        },
    };

    ResolvedTarget { problem, domain }
}

/// Applies rules 1, 2 and 6 to one override.
fn resolve_override(dir: &Path, value: &OutputOverride) -> Destination {
    match value {
        OutputOverride::Stdout => Destination::Stdout,
        OutputOverride::Path(path) if path.is_absolute() => Destination::File(path.clone()),
        OutputOverride::Path(path) => Destination::File(dir.join(path)),
    }
}

/// `{dir}/{stem}-domain.pddl` for a problem file at `{dir}/{stem}.pddl`.
pub fn domain_file_path(problem: &Path) -> PathBuf {
    let stem = problem
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    problem.with_file_name(format!("{}-domain.pddl", stem))
}

/// Creates the output directory and the parent of every written file.
///
/// The output directory is created even when every target is standard
/// output.
pub fn create_output_dirs(
    request: &InvocationRequest,
    target: &ResolvedTarget,
) -> Result<(), ResolveError> {
    let files = target.written_files();
    let mut dirs: Vec<&Path> = vec![&request.output_directory];
    dirs.extend(files.iter().filter_map(|f| f.parent()));

    for dir in dirs {
        if dir.as_os_str().is_empty() {
            continue;
        }
        fs::create_dir_all(dir).map_err(|source| ResolveError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HASH: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn shared() -> DomainSource {
        DomainSource::Shared(PathBuf::from("/opt/domains/visitall/domain.pddl"))
    }

    #[test]
    fn test_default_problem_name_is_hash() {
        let request = InvocationRequest::new("visitall");
        let target = resolve_targets(&request, &shared(), HASH);
        assert_eq!(
            target.problem,
            Destination::File(PathBuf::from(format!("output/{}.pddl", HASH)))
        );
    }

    #[test]
    fn test_absolute_override_ignores_output_directory() {
        let request = InvocationRequest::new("visitall")
            .with_output_directory("somewhere/else")
            .with_output(OutputOverride::Path(PathBuf::from("/tmp/p01.pddl")));
        let target = resolve_targets(&request, &shared(), HASH);
        assert_eq!(target.problem, Destination::File(PathBuf::from("/tmp/p01.pddl")));
    }

    #[test]
    fn test_relative_override_joins_output_directory() {
        let request = InvocationRequest::new("visitall")
            .with_output_directory("out")
            .with_output(OutputOverride::Path(PathBuf::from("sub/p01.pddl")));
        let target = resolve_targets(&request, &shared(), HASH);
        assert_eq!(target.problem, Destination::File(PathBuf::from("out/sub/p01.pddl")));
    }

    #[test]
    fn test_shared_domain_without_override_stays_in_place() {
        let request = InvocationRequest::new("visitall");
        let target = resolve_targets(&request, &shared(), HASH);
        assert_eq!(
            target.domain,
            DomainTarget::Shared(PathBuf::from("/opt/domains/visitall/domain.pddl"))
        );
        assert_eq!(target.written_files().len(), 1);
    }

    #[test]
    fn test_shared_domain_with_override_is_copied() {
        let request = InvocationRequest::new("visitall")
            .with_output_domain(OutputOverride::Path(PathBuf::from("domain.pddl")));
        let target = resolve_targets(&request, &shared(), HASH);
        assert_eq!(
            target.domain,
            DomainTarget::Copy {
                source: PathBuf::from("/opt/domains/visitall/domain.pddl"),
                destination: Destination::File(PathBuf::from("output/domain.pddl")),
            }
        );
    }

    #[test]
    fn test_synthesized_domain_follows_problem_basename() {
        let request = InvocationRequest::new("compiled")
            .with_output(OutputOverride::Path(PathBuf::from("p01.pddl")));
        let target = resolve_targets(&request, &DomainSource::Synthesized, HASH);
        assert_eq!(
            target.domain,
            DomainTarget::Generate(Destination::File(PathBuf::from("output/p01-domain.pddl")))
        );

        let request = InvocationRequest::new("compiled");
        let target = resolve_targets(&request, &DomainSource::Synthesized, HASH);
        assert_eq!(
            target.domain,
            DomainTarget::Generate(Destination::File(PathBuf::from(format!(
                "output/{}-domain.pddl",
                HASH
            ))))
        );
    }

    #[test]
    fn test_synthesized_domain_follows_stdout_problem() {
        let request = InvocationRequest::new("compiled").with_output(OutputOverride::Stdout);
        let target = resolve_targets(&request, &DomainSource::Synthesized, HASH);
        assert_eq!(target.problem, Destination::Stdout);
        assert_eq!(target.domain, DomainTarget::Generate(Destination::Stdout));
        assert!(target.written_files().is_empty());
    }

    #[test]
    fn test_synthesized_domain_override_wins_over_stdout_problem() {
        let request = InvocationRequest::new("compiled")
            .with_output(OutputOverride::Stdout)
            .with_output_domain(OutputOverride::Path(PathBuf::from("/abs/d.pddl")));
        let target = resolve_targets(&request, &DomainSource::Synthesized, HASH);
        assert_eq!(
            target.domain,
            DomainTarget::Generate(Destination::File(PathBuf::from("/abs/d.pddl")))
        );
    }

    #[test]
    fn test_absent_domain_ignores_override() {
        let request = InvocationRequest::new("nodomain")
            .with_output_domain(OutputOverride::Path(PathBuf::from("d.pddl")));
        let target = resolve_targets(&request, &DomainSource::Absent, HASH);
        assert_eq!(target.domain, DomainTarget::Absent);
        assert!(target.written_files().iter().all(|f| !f.ends_with("d.pddl")));
    }

    #[test]
    fn test_domain_file_path_without_extension() {
        assert_eq!(
            domain_file_path(Path::new("out/p01")),
            PathBuf::from("out/p01-domain.pddl")
        );
    }

    #[test]
    fn test_create_output_dirs_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let request = InvocationRequest::new("visitall")
            .with_output_directory(tmp.path().join("a/b"))
            .with_output(OutputOverride::Path(PathBuf::from("c/p.pddl")));
        let target = resolve_targets(&request, &shared(), HASH);
        create_output_dirs(&request, &target).unwrap();
        assert!(tmp.path().join("a/b/c").is_dir());
    }

    #[test]
    fn test_create_output_dirs_for_stdout_only() {
        let tmp = tempfile::tempdir().unwrap();
        let request = InvocationRequest::new("visitall")
            .with_output_directory(tmp.path().join("out/nested"))
            .with_output(OutputOverride::Stdout);
        let target = resolve_targets(&request, &shared(), HASH);
        assert!(target.written_files().is_empty());
        create_output_dirs(&request, &target).unwrap();
        assert!(tmp.path().join("out/nested").is_dir());
    }

    #[test]
    fn test_create_output_dirs_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let request = InvocationRequest::new("visitall").with_output_directory(blocker.join("sub"));
        let target = resolve_targets(&request, &shared(), HASH);
        let err = create_output_dirs(&request, &target).unwrap_err();
        assert_eq!(err.path(), blocker.join("sub"));
    }
}
