//! Directory, ownership and mode changes on the host

use std::path::Path;
use std::time::Duration;

use share_sys::{DEFAULT_TOOL_TIMEOUT, ToolCommand};

/// Host filesystem operations used while provisioning a share.
pub trait HostOps: Send + Sync {
    /// Create `path` and missing parents. Returns whether anything was created.
    fn ensure_dir(&self, path: &Path) -> share_sys::Result<bool>;

    /// Change owner and/or group. At least one of the two is given.
    fn chown(&self, path: &Path, owner: Option<&str>, group: Option<&str>) -> share_sys::Result<()>;

    fn chmod(&self, path: &Path, mode: u32) -> share_sys::Result<()>;
}

/// Operates on the real filesystem; ownership goes through `chown`/`chgrp`.
#[derive(Debug, Clone)]
pub struct SystemHost {
    timeout: Duration,
}

impl SystemHost {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_TIMEOUT)
    }
}

/// The `chown`/`chgrp` invocation for an ownership change, if any.
pub fn ownership_command(path: &Path, owner: Option<&str>, group: Option<&str>) -> Option<ToolCommand> {
    let cmd = match (owner, group) {
        (Some(owner), Some(group)) => ToolCommand::new("chown").arg(format!("{}:{}", owner, group)),
        (Some(owner), None) => ToolCommand::new("chown").arg(owner),
        (None, Some(group)) => ToolCommand::new("chgrp").arg(group),
        (None, None) => return None,
    };
    Some(cmd.path_arg(path))
}

impl HostOps for SystemHost {
    fn ensure_dir(&self, path: &Path) -> share_sys::Result<bool> {
        share_sys::io::ensure_dir(path)
    }

    fn chown(&self, path: &Path, owner: Option<&str>, group: Option<&str>) -> share_sys::Result<()> {
        match ownership_command(path, owner, group) {
            Some(cmd) => cmd.timeout(self.timeout).run().map(|_| ()),
            None => Ok(()),
        }
    }

    fn chmod(&self, path: &Path, mode: u32) -> share_sys::Result<()> {
        share_sys::io::set_mode(path, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("alice"), Some("eng"), Some("chown alice:eng /srv/docs"))]
    #[case(Some("alice"), None, Some("chown alice /srv/docs"))]
    #[case(None, Some("eng"), Some("chgrp eng /srv/docs"))]
    #[case(None, None, None)]
    fn ownership_commands(
        #[case] owner: Option<&str>,
        #[case] group: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let cmd = ownership_command(Path::new("/srv/docs"), owner, group);
        assert_eq!(cmd.map(|c| c.display()).as_deref(), expected);
    }

    #[test]
    fn ensure_dir_reports_creation() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b");
        let host = SystemHost::default();

        assert!(host.ensure_dir(&target).unwrap());
        assert!(!host.ensure_dir(&target).unwrap());
        assert!(target.is_dir());
    }
}
