//! Domain descriptors.

use std::path::{Path, PathBuf};

/// Where the domain-definition file for a domain comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSource {
    /// A fixed domain file shipped with the plugin, shared by every problem.
    Shared(PathBuf),
    /// The plugin generates a fresh domain file on every run.
    Synthesized,
    /// The plugin neither ships nor generates a domain file.
    Absent,
}

impl DomainSource {
    /// Returns the shared domain file, if this domain ships one.
    pub fn shared_file(&self) -> Option<&Path> {
        match self {
            DomainSource::Shared(path) => Some(path),
            _ => None,
        }
    }

    /// Returns true if a domain file is generated per run.
    pub fn is_synthesized(&self) -> bool {
        matches!(self, DomainSource::Synthesized)
    }
}

/// A discovered domain and the source of its domain file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDescriptor {
    /// Unique domain name; equal to the plugin directory name.
    pub name: String,
    /// Where the domain file comes from.
    pub domain_file: DomainSource,
}

impl DomainDescriptor {
    /// Creates a new descriptor.
    pub fn new(name: impl Into<String>, domain_file: DomainSource) -> Self {
        Self {
            name: name.into(),
            domain_file,
        }
    }

    /// Returns the absolute path of the fixed domain file, if any.
    pub fn domain_file(&self) -> Option<&Path> {
        self.domain_file.shared_file()
    }
}
