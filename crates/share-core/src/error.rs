//! Error types for share-core

use std::path::PathBuf;

use crate::provision::ProvisionStage;

/// Result type for share-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Conceptual status of a failure, for outer surfaces to map onto their
/// own codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    NotFound,
    BadRequest,
    Internal,
}

/// Errors that can occur in share-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Share or section absent
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Request rejected before anything was changed
    #[error("{message}")]
    Validation { message: String },

    /// A provisioning stage failed; earlier stages are not undone
    #[error("Provisioning of '{share}' failed at {stage}: {source}")]
    Provision {
        share: String,
        stage: ProvisionStage,
        #[source]
        source: Box<Error>,
    },

    /// Service reload or status query failed
    #[error("Service '{service}' operation failed: {source}")]
    Service {
        service: String,
        #[source]
        source: share_sys::Error,
    },

    /// Settings file could not be read or parsed
    #[error("Invalid settings in {path}: {message}")]
    Settings { path: PathBuf, message: String },

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Conf(#[from] share_conf::Error),

    #[error(transparent)]
    Acl(#[from] share_acl::Error),

    #[error(transparent)]
    Usage(#[from] share_usage::Error),

    #[error(transparent)]
    Sys(#[from] share_sys::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn share_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Share",
            name: name.into(),
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self {
            Error::NotFound { .. } => StatusClass::NotFound,
            Error::Validation { .. } => StatusClass::BadRequest,
            Error::Acl(share_acl::Error::UnknownPrincipal { .. }) => StatusClass::BadRequest,
            Error::Provision { source, .. } => source.status_class(),
            _ => StatusClass::Internal,
        }
    }
}
