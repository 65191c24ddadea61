//! Error types for share-acl

use std::path::PathBuf;

/// Result type for ACL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while applying, inspecting or validating ACLs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An ACL tool exited non-zero, timed out or could not be started.
    #[error("ACL operation '{operation}' failed on {target}: {source}")]
    ToolFailed {
        operation: String,
        target: PathBuf,
        #[source]
        source: share_sys::Error,
    },

    #[error("User '{principal}' from '{list}' does not exist")]
    UnknownPrincipal { principal: String, list: String },

    #[error("Failed to list known users: {0}")]
    Directory(#[source] share_sys::Error),

    #[error(transparent)]
    Sys(#[from] share_sys::Error),
}

impl Error {
    pub(crate) fn tool(operation: impl Into<String>, target: impl Into<PathBuf>, source: share_sys::Error) -> Self {
        Self::ToolFailed {
            operation: operation.into(),
            target: target.into(),
            source,
        }
    }
}
