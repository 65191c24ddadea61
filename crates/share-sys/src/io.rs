//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use fs2::FileExt;

use crate::{Error, Result};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace the contents of a file atomically.
///
/// Uses write-to-temp-then-rename so readers only ever observe the old or
/// the new content. The temp file lives in the same directory (same
/// filesystem) and is held under an exclusive advisory lock while written.
/// Permission bits of an existing target are carried over to the new file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Unique per call so concurrent writers in one process never share a temp file
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|_| temp_file.sync_all())
        .map_err(|e| Error::io(&temp_path, e));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Ok(meta) = fs::metadata(path) {
        fs::set_permissions(&temp_path, meta.permissions())
            .map_err(|e| Error::io(&temp_path, e))?;
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Replaced file atomically");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Create a directory and all missing parents.
///
/// Returns `true` if the directory had to be created.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    Ok(true)
}

/// Set unix permission bits (e.g. `0o775`) on a path.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    tracing::warn!(path = %path.display(), mode = %format!("{:o}", mode), "Permission bits not supported on this platform");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("smb.conf");

        write_text(&path, "[global]\n").unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert_eq!(read_text(&path).unwrap(), "[global]\n");
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("smb.conf");
        fs::write(&path, "old contents that are longer").unwrap();

        write_text(&path, "new").unwrap();

        assert_eq!(read_text(&path).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("smb.conf");
        fs::write(&path, "x").unwrap();
        set_mode(&path, 0o640).unwrap();

        write_text(&path, "y").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn ensure_dir_reports_creation() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("srv/docs");

        assert!(ensure_dir(&target).unwrap());
        assert!(!ensure_dir(&target).unwrap());
        assert!(target.is_dir());
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("absent.conf")).unwrap_err();
        assert!(err.is_not_found());
    }
}
