//! The ACL-mutation seam and its setfacl implementation

use std::path::Path;
use std::time::Duration;

use share_sys::{DEFAULT_TOOL_TIMEOUT, ToolCommand};

use crate::entry::{AccessEntry, AclScope, AclStep, Permission, mask_spec};
use crate::error::{Error, Result};
use crate::inspect::{ShareAcl, parse_getfacl};

/// Primitive ACL operations on a share root.
///
/// Inherited-scope operations apply to the path and all its descendants.
pub trait AclBackend: Send + Sync {
    /// Remove every extended ACL entry from `path`.
    fn clear(&self, path: &Path) -> Result<()>;

    fn set_mask(&self, path: &Path, permission: Permission, scope: AclScope) -> Result<()>;

    /// Add or replace one named entry without recomputing the mask.
    fn set_entry(&self, path: &Path, entry: &AccessEntry) -> Result<()>;

    /// Read the ACL currently in effect on `path`.
    fn list(&self, path: &Path) -> Result<ShareAcl>;

    /// Dispatch a planned step to the matching primitive.
    fn apply_step(&self, path: &Path, step: &AclStep) -> Result<()> {
        match step {
            AclStep::Clear => self.clear(path),
            AclStep::SetMask { permission, scope } => self.set_mask(path, *permission, *scope),
            AclStep::SetEntry(entry) => self.set_entry(path, entry),
        }
    }
}

/// Backend that runs `setfacl` and `getfacl`
#[derive(Debug, Clone)]
pub struct SetfaclBackend {
    timeout: Duration,
}

impl SetfaclBackend {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn setfacl(&self, path: &Path, recursive: bool, args: &[&str]) -> ToolCommand {
        let mut cmd = ToolCommand::new("setfacl").timeout(self.timeout);
        if recursive {
            cmd = cmd.arg("-R");
        }
        cmd.args(args.iter().copied()).path_arg(path)
    }

    fn run(&self, operation: String, path: &Path, cmd: ToolCommand) -> Result<()> {
        cmd.run()
            .map(|_| ())
            .map_err(|source| Error::tool(operation, path, source))
    }
}

impl Default for SetfaclBackend {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_TIMEOUT)
    }
}

impl AclBackend for SetfaclBackend {
    fn clear(&self, path: &Path) -> Result<()> {
        let cmd = self.setfacl(path, false, &["-b"]);
        self.run(AclStep::Clear.describe(), path, cmd)
    }

    fn set_mask(&self, path: &Path, permission: Permission, scope: AclScope) -> Result<()> {
        let spec = mask_spec(permission, scope);
        let cmd = self.setfacl(path, scope.is_inherited(), &["-m", &spec]);
        self.run(format!("set {}", spec), path, cmd)
    }

    fn set_entry(&self, path: &Path, entry: &AccessEntry) -> Result<()> {
        let spec = entry.spec();
        let cmd = self.setfacl(path, entry.scope.is_inherited(), &["-n", "-m", &spec]);
        self.run(format!("set {}", spec), path, cmd)
    }

    fn list(&self, path: &Path) -> Result<ShareAcl> {
        let output = ToolCommand::new("getfacl")
            .timeout(self.timeout)
            .arg("-p")
            .path_arg(path)
            .run()
            .map_err(|source| Error::tool("list", path, source))?;
        Ok(parse_getfacl(&path.to_string_lossy(), &output.stdout))
    }
}
