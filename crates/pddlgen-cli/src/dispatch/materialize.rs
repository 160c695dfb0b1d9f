//! Writes stamped generator output to its resolved destinations.

use pddlgen_spec::{Destination, DomainTarget, GenerationMetadata, ParamSet, ResolvedTarget};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::DispatchError;
use crate::plugins::{Artifact, Generation};

/// One entry of the standard output report, in print order.
enum Part {
    /// Content streamed to stdout, preceded by an optional separator line.
    Stream {
        content: Vec<u8>,
        separator: Option<String>,
    },
    /// An absolute path line for a file on disk.
    Path(PathBuf),
}

/// Writes the problem, then the domain part, and reports both on `out`.
///
/// Every file is written before anything reaches `out`. If a write fails,
/// the files already written by this call are removed and `out` receives
/// nothing.
///
/// Standard output receives the problem content or the problem path, then
/// either the separator line followed by the domain content, or the domain
/// path. A domain that has no domain file contributes nothing.
pub(crate) fn write_outputs(
    domain: &str,
    target: &ResolvedTarget,
    generation: &Generation,
    parameters: &ParamSet,
    separator: &str,
    out: &mut dyn Write,
) -> Result<(), DispatchError> {
    let mut pending = vec![(&target.problem, stamp(&generation.problem, parameters), None)];
    let mut shared = None;

    match &target.domain {
        DomainTarget::Absent => {}
        DomainTarget::Shared(path) => shared = Some(path.clone()),
        DomainTarget::Copy {
            source,
            destination,
        } => {
            let content = fs::read(source).map_err(|e| DispatchError::Write {
                path: source.clone(),
                source: e,
            })?;
            pending.push((destination, content, Some(separator)));
        }
        DomainTarget::Generate(destination) => {
            let artifact = generation
                .domain
                .as_ref()
                .ok_or_else(|| DispatchError::MissingDomainOutput(domain.to_string()))?;
            pending.push((destination, stamp(artifact, parameters), Some(separator)));
        }
    }

    let mut written: Vec<PathBuf> = Vec::new();
    let mut parts = Vec::with_capacity(pending.len() + 1);
    for (destination, content, separator) in pending {
        match destination {
            Destination::File(path) => {
                if let Err(source) = fs::write(path, &content) {
                    discard(&written);
                    return Err(DispatchError::Write {
                        path: path.clone(),
                        source,
                    });
                }
                written.push(path.clone());
                parts.push(Part::Path(path.clone()));
            }
            Destination::Stdout => parts.push(Part::Stream {
                content,
                separator: separator.map(str::to_string),
            }),
        }
    }
    parts.extend(shared.map(Part::Path));

    for part in &parts {
        report(part, out)?;
    }
    out.flush().map_err(DispatchError::Stdout)
}

fn stamp(artifact: &Artifact, parameters: &ParamSet) -> Vec<u8> {
    GenerationMetadata::new(&artifact.command, parameters.clone()).stamp(&artifact.content)
}

/// Removes files written earlier in a failed call.
fn discard(written: &[PathBuf]) {
    for path in written {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove partial output");
        }
    }
}

fn report(part: &Part, out: &mut dyn Write) -> Result<(), DispatchError> {
    match part {
        Part::Path(path) => announce(path, out),
        Part::Stream { content, separator } => {
            if let Some(separator) = separator {
                writeln!(out, "{}", separator).map_err(DispatchError::Stdout)?;
            }
            out.write_all(content).map_err(DispatchError::Stdout)?;
            if !content.ends_with(b"\n") {
                out.write_all(b"\n").map_err(DispatchError::Stdout)?;
            }
            Ok(())
        }
    }
}

fn announce(path: &Path, out: &mut dyn Write) -> Result<(), DispatchError> {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    writeln!(out, "{}", absolute.display()).map_err(DispatchError::Stdout)
}
