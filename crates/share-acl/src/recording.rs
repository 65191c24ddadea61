//! In-memory ACL backend that records calls and simulates their effect

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use share_conf::PrincipalKind;

use crate::backend::AclBackend;
use crate::entry::{AccessEntry, AclScope, AclStep, Permission};
use crate::error::{Error, Result};
use crate::inspect::{AclEntryView, ShareAcl};

/// One primitive call received by a [`RecordingAclBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclCall {
    pub path: PathBuf,
    pub step: AclStep,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SimulatedAcl {
    mask: Option<Permission>,
    default_mask: Option<Permission>,
    entries: BTreeMap<(bool, PrincipalKind, String), Permission>,
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<AclCall>,
    acls: BTreeMap<PathBuf, SimulatedAcl>,
    fail_at: Option<usize>,
}

/// ACL backend for tests.
///
/// Every primitive call is appended to an ordered log, then applied to a
/// simulated ACL for the target path (only the path itself, descendants of
/// recursive operations are not modelled). [`AclBackend::list`] reports the
/// simulated state with owner and group `root`.
#[derive(Debug, Default)]
pub struct RecordingAclBackend {
    inner: Mutex<Recorder>,
}

impl RecordingAclBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the call with the given zero-based index fail. The failing call
    /// is still recorded but has no effect on the simulated ACL.
    pub fn failing_at(index: usize) -> Self {
        let backend = Self::default();
        backend.inner.lock().fail_at = Some(index);
        backend
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<AclCall> {
        self.inner.lock().calls.clone()
    }

    /// The steps received so far, without their paths.
    pub fn steps(&self) -> Vec<AclStep> {
        self.inner.lock().calls.iter().map(|c| c.step.clone()).collect()
    }

    /// Forget recorded calls; the simulated ACLs are kept.
    pub fn reset_calls(&self) {
        self.inner.lock().calls.clear();
    }

    fn record(&self, path: &Path, step: AclStep) -> Result<()> {
        let mut inner = self.inner.lock();
        let index = inner.calls.len();
        inner.calls.push(AclCall {
            path: path.to_path_buf(),
            step: step.clone(),
        });

        if inner.fail_at == Some(index) {
            return Err(Error::tool(
                step.describe(),
                path,
                share_sys::Error::ToolFailed {
                    program: "setfacl".to_string(),
                    code: 1,
                    stderr: "simulated failure".to_string(),
                },
            ));
        }

        let acl = inner.acls.entry(path.to_path_buf()).or_default();
        match step {
            AclStep::Clear => *acl = SimulatedAcl::default(),
            AclStep::SetMask { permission, scope } => match scope {
                AclScope::Immediate => acl.mask = Some(permission),
                AclScope::Inherited => acl.default_mask = Some(permission),
            },
            AclStep::SetEntry(entry) => {
                let key = (entry.scope.is_inherited(), entry.kind(), entry.principal.name);
                acl.entries.insert(key, entry.permission);
            }
        }
        Ok(())
    }
}

impl AclBackend for RecordingAclBackend {
    fn clear(&self, path: &Path) -> Result<()> {
        self.record(path, AclStep::Clear)
    }

    fn set_mask(&self, path: &Path, permission: Permission, scope: AclScope) -> Result<()> {
        self.record(path, AclStep::SetMask { permission, scope })
    }

    fn set_entry(&self, path: &Path, entry: &AccessEntry) -> Result<()> {
        self.record(path, AclStep::SetEntry(entry.clone()))
    }

    fn list(&self, path: &Path) -> Result<ShareAcl> {
        let inner = self.inner.lock();
        let mut acl = ShareAcl::new(path.to_string_lossy());
        acl.owner = "root".to_string();
        acl.group = "root".to_string();

        if let Some(sim) = inner.acls.get(path) {
            acl.mask = sim.mask.map(|p| p.to_string());
            acl.default_mask = sim.default_mask.map(|p| p.to_string());
            acl.entries = sim
                .entries
                .iter()
                .map(|((is_default, kind, name), permission)| AclEntryView {
                    kind: *kind,
                    principal: name.clone(),
                    permission: permission.to_string(),
                    is_default: *is_default,
                })
                .collect();
        }
        Ok(acl)
    }
}
