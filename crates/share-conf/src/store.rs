//! Reading and merge-writing the configuration file on disk

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::writer::merge;

/// Access to the share configuration file.
///
/// Holds no long-lived copy of the file and no lock over it: every read
/// parses the file fresh and every write rescans the current on-disk text.
/// Callers serialize their own read-modify-write sequences. The only state
/// is the file path, which can be reconfigured at runtime.
#[derive(Debug)]
pub struct ConfigStore {
    path: RwLock<PathBuf>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: RwLock::new(path.into()),
        }
    }

    /// The configuration file currently in use.
    pub fn path(&self) -> PathBuf {
        self.path.read().clone()
    }

    /// Point the store at a different configuration file.
    pub fn set_path(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::info!(path = %path.display(), "Configuration path changed");
        *self.path.write() = path;
    }

    /// Read and parse the configuration file.
    pub fn read(&self) -> Result<ConfigDocument> {
        let text = self.read_raw()?;
        Ok(ConfigDocument::parse(&text))
    }

    /// Read the configuration file as text.
    pub fn read_raw(&self) -> Result<String> {
        let path = self.path();
        read_existing(&path)
    }

    /// Compute the text a [`ConfigStore::write`] would produce, without writing.
    pub fn render<I, S>(&self, doc: &ConfigDocument, changed: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let changed: BTreeSet<String> = changed.into_iter().map(Into::into).collect();
        let old_text = self.read_raw()?;
        Ok(merge(&old_text, doc, &changed))
    }

    /// Merge-write the sections named in `changed` from `doc`.
    ///
    /// Parameter blocks of changed sections are replaced (or dropped when
    /// the section is no longer in `doc`); everything else in the file is
    /// kept verbatim. The file is replaced atomically.
    pub fn write<I, S>(&self, doc: &ConfigDocument, changed: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = self.path();
        let changed: BTreeSet<String> = changed.into_iter().map(Into::into).collect();
        let old_text = read_existing(&path)?;
        let new_text = merge(&old_text, doc, &changed);

        share_sys::io::write_text(&path, &new_text)?;
        tracing::info!(
            path = %path.display(),
            sections = ?changed,
            "Configuration written"
        );
        Ok(())
    }

    /// Replace the whole file with `text`.
    pub fn write_raw(&self, text: &str) -> Result<()> {
        let path = self.path();
        share_sys::io::write_text(&path, text)?;
        tracing::info!(path = %path.display(), "Raw configuration written");
        Ok(())
    }
}

fn read_existing(path: &Path) -> Result<String> {
    let bytes = share_sys::io::read_bytes(path).map_err(|e| {
        if e.is_not_found() {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Sys(e)
        }
    })?;

    String::from_utf8(bytes).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
