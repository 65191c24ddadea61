//! Error types for share-sys

use std::path::PathBuf;
use std::time::Duration;

/// Result type for share-sys operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in share-sys operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with code {code}: {stderr}")]
    ToolFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("{program} did not finish within {timeout:?}")]
    ToolTimeout { program: String, timeout: Duration },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
