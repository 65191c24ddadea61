//! Error types for share-conf

use std::path::PathBuf;

/// Result type for share-conf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur reading or writing the share configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file does not exist
    #[error("Configuration file not found at {path}")]
    NotFound { path: PathBuf },

    /// The file could not be interpreted at all.
    ///
    /// Individual unrecognized lines are skipped, not reported; this is only
    /// raised when the content is not text.
    #[error("Failed to parse configuration at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Filesystem error from share-sys
    #[error(transparent)]
    Sys(#[from] share_sys::Error),
}
