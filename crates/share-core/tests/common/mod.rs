//! Fake collaborators for share-core tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use share_acl::{RecordingAclBackend, StaticDirectory};
use share_core::{AdminContext, HostOps, ServiceControl, ServiceStatus};
use share_test_utils::TestConf;
use share_test_utils::fixtures::{DF_OUTPUT, du_output};
use share_usage::{DEFAULT_TTL, ManualClock, UsageCache, UsageProbe};

#[derive(Default)]
pub struct FakeService {
    pub reloads: AtomicUsize,
    pub fail: AtomicBool,
}

impl ServiceControl for FakeService {
    fn name(&self) -> &str {
        "smbd"
    }

    fn reload(&self) -> share_sys::Result<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(share_sys::Error::ToolFailed {
                program: "systemctl".into(),
                code: 1,
                stderr: "Job for smbd.service failed".into(),
            });
        }
        Ok(())
    }

    fn status(&self) -> share_sys::Result<ServiceStatus> {
        Ok(ServiceStatus::from_systemctl("smbd", "active", None, chrono::Utc::now()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Chown {
        path: PathBuf,
        owner: Option<String>,
        group: Option<String>,
    },
    Chmod {
        path: PathBuf,
        mode: u32,
    },
}

/// Creates directories for real (inside the test's temp dir) and records
/// ownership and mode changes.
#[derive(Default)]
pub struct FakeHost {
    pub calls: Mutex<Vec<HostCall>>,
}

impl FakeHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl HostOps for FakeHost {
    fn ensure_dir(&self, path: &Path) -> share_sys::Result<bool> {
        share_sys::io::ensure_dir(path)
    }

    fn chown(&self, path: &Path, owner: Option<&str>, group: Option<&str>) -> share_sys::Result<()> {
        self.calls.lock().unwrap().push(HostCall::Chown {
            path: path.to_path_buf(),
            owner: owner.map(str::to_string),
            group: group.map(str::to_string),
        });
        Ok(())
    }

    fn chmod(&self, path: &Path, mode: u32) -> share_sys::Result<()> {
        self.calls.lock().unwrap().push(HostCall::Chmod {
            path: path.to_path_buf(),
            mode,
        });
        Ok(())
    }
}

struct FixtureProbe;

impl UsageProbe for FixtureProbe {
    fn disk_free(&self) -> share_usage::Result<String> {
        Ok(DF_OUTPUT.to_string())
    }

    fn disk_usage(&self, path: &Path) -> share_usage::Result<String> {
        Ok(du_output("1.0G", &path.to_string_lossy()))
    }
}

/// A context over a [`TestConf`] with recording and fake collaborators.
pub struct Harness {
    pub conf: TestConf,
    pub acl: Arc<RecordingAclBackend>,
    pub service: Arc<FakeService>,
    pub host: Arc<FakeHost>,
    pub ctx: AdminContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_acl(TestConf::new(), RecordingAclBackend::new())
    }

    pub fn with_acl(conf: TestConf, acl: RecordingAclBackend) -> Self {
        let acl = Arc::new(acl);
        let service = Arc::new(FakeService::default());
        let host = Arc::new(FakeHost::default());
        let ctx = AdminContext::new(
            conf.store(),
            UsageCache::new(DEFAULT_TTL, Arc::new(FixtureProbe), Arc::new(ManualClock::new())),
            acl.clone(),
            Arc::new(StaticDirectory::new(["alice", "bob", "carol"])),
            service.clone(),
            host.clone(),
        );
        Self {
            conf,
            acl,
            service,
            host,
            ctx,
        }
    }

    pub fn reloads(&self) -> usize {
        self.service.reloads.load(Ordering::SeqCst)
    }
}
