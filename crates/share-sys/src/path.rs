//! Normalized absolute path handling for share and mount paths

use std::path::{Path, PathBuf};

/// A slash-separated path with redundant separators removed.
///
/// Share paths come from a hand-edited configuration file and mount points
/// from tool output, so both are normalized before they are compared:
/// repeated slashes collapse and trailing slashes are dropped (except for
/// the root itself).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        let absolute = raw.starts_with('/');
        let joined = raw
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        let inner = match (absolute, joined.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => format!("/{}", joined),
            (false, _) => joined,
        };
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    pub fn is_root(&self) -> bool {
        self.inner == "/"
    }

    /// Number of path components (`/` has zero).
    pub fn depth(&self) -> usize {
        self.components().count()
    }

    /// Iterate over the non-empty components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Component-aware prefix test.
    ///
    /// `/data` contains `/data` and `/data/shared` but not `/database`.
    /// The root contains every absolute path.
    pub fn contains(&self, other: &NormalizedPath) -> bool {
        if self.is_root() {
            return other.is_absolute();
        }
        match other.inner.strip_prefix(&self.inner) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.components().last()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
