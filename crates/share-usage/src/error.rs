//! Error types for share-usage

/// Result type for usage queries
pub type Result<T> = std::result::Result<T, Error>;

/// Whole-call failures; per-share measurement failures are skipped instead
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sys(#[from] share_sys::Error),

    #[error(transparent)]
    Conf(#[from] share_conf::Error),
}
