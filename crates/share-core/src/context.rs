//! The process-wide administration context

use std::sync::Arc;

use share_acl::{AclBackend, PdbeditDirectory, PrincipalDirectory, SetfaclBackend};
use share_conf::ConfigStore;
use share_usage::UsageCache;

use crate::host::{HostOps, SystemHost};
use crate::service::{ServiceControl, SystemdService};
use crate::settings::Settings;

/// Configuration store, usage caches and external collaborators.
///
/// Built once per process and shared by every operation. Tests assemble
/// one from recording or fake collaborators with [`AdminContext::new`].
pub struct AdminContext {
    pub store: ConfigStore,
    pub usage: UsageCache,
    pub acl: Arc<dyn AclBackend>,
    pub directory: Arc<dyn PrincipalDirectory>,
    pub service: Arc<dyn ServiceControl>,
    pub host: Arc<dyn HostOps>,
}

impl AdminContext {
    pub fn new(
        store: ConfigStore,
        usage: UsageCache,
        acl: Arc<dyn AclBackend>,
        directory: Arc<dyn PrincipalDirectory>,
        service: Arc<dyn ServiceControl>,
        host: Arc<dyn HostOps>,
    ) -> Self {
        Self {
            store,
            usage,
            acl,
            directory,
            service,
            host,
        }
    }

    /// Context backed by the real tools (setfacl, pdbedit, systemctl, df, du).
    pub fn from_settings(settings: &Settings) -> Self {
        let timeout = settings.tool_timeout();
        tracing::debug!(
            conf = %settings.samba_conf_path.display(),
            service = %settings.service_name,
            "Building administration context"
        );
        Self::new(
            ConfigStore::new(&settings.samba_conf_path),
            UsageCache::system(settings.cache_ttl(), timeout),
            Arc::new(SetfaclBackend::new(timeout)),
            Arc::new(PdbeditDirectory::new(timeout)),
            Arc::new(SystemdService::new(&settings.service_name, timeout)),
            Arc::new(SystemHost::new(timeout)),
        )
    }
}

impl std::fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminContext")
            .field("store", &self.store)
            .field("usage", &self.usage)
            .field("service", &self.service.name())
            .finish_non_exhaustive()
    }
}
