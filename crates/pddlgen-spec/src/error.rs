//! Error types for output resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing resolved output locations.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// Returns the directory that could not be created.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ResolveError::CreateDir { path, .. } => path,
        }
    }
}
