//! [`TestConf`] fixture

use std::fs;
use std::path::{Path, PathBuf};

use share_conf::ConfigStore;
use tempfile::TempDir;

use crate::fixtures::SMB_CONF;

/// A temporary directory holding `smb.conf`, plus room for share
/// directories.
///
/// # Example
///
/// ```rust,no_run
/// use share_test_utils::TestConf;
///
/// let conf = TestConf::new();
/// let store = conf.store();
/// assert!(store.read().unwrap().contains("media"));
/// ```
pub struct TestConf {
    temp_dir: TempDir,
}

impl Default for TestConf {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConf {
    /// Scratch directory with the standard [`SMB_CONF`] fixture.
    pub fn new() -> Self {
        Self::with_content(SMB_CONF)
    }

    pub fn with_content(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("smb.conf"), content).unwrap();
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn conf_path(&self) -> PathBuf {
        self.root().join("smb.conf")
    }

    /// A [`ConfigStore`] pointed at this fixture's `smb.conf`.
    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.conf_path())
    }

    /// Absolute path for a share directory inside the scratch area (not created).
    pub fn share_path(&self, name: &str) -> PathBuf {
        self.root().join("shares").join(name)
    }

    pub fn read_conf(&self) -> String {
        fs::read_to_string(self.conf_path()).unwrap()
    }

    /// # Panics
    /// Panics if the configuration does not contain `content`.
    pub fn assert_conf_contains(&self, content: &str) {
        let text = self.read_conf();
        assert!(
            text.contains(content),
            "Expected smb.conf to contain {:?}\n--- smb.conf ---\n{}",
            content,
            text
        );
    }

    /// # Panics
    /// Panics if the configuration contains `content`.
    pub fn assert_conf_not_contains(&self, content: &str) {
        let text = self.read_conf();
        assert!(
            !text.contains(content),
            "Expected smb.conf NOT to contain {:?}\n--- smb.conf ---\n{}",
            content,
            text
        );
    }
}
