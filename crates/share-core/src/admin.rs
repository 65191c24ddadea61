//! Share, section and raw configuration operations

use std::collections::BTreeMap;
use std::path::Path;

use share_acl::{AccessPolicyTranslator, ShareAcl};
use share_conf::{Section, keys};
use share_usage::{FilesystemUsage, ShareUsage};

use crate::context::AdminContext;
use crate::error::{Error, Result};
use crate::provision::{ProvisionReport, ProvisioningOrchestrator};
use crate::service::ServiceStatus;
use crate::validate::{check_params, check_section_name, check_share, check_share_name};

/// Configuration text before and after a prospective change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPreview {
    pub before: String,
    pub after: String,
}

impl ConfigPreview {
    pub fn is_unchanged(&self) -> bool {
        self.before == self.after
    }
}

impl AdminContext {
    /// All shares, keyed by name. Reserved sections are never included.
    pub fn list_shares(&self) -> Result<BTreeMap<String, Section>> {
        Ok(self.store.read()?.share_map())
    }

    pub fn get_share(&self, name: &str) -> Result<Section> {
        let doc = self.store.read()?;
        doc.shares()
            .find(|(n, _)| *n == name)
            .map(|(_, section)| section.clone())
            .ok_or_else(|| Error::share_not_found(name))
    }

    /// Create or replace a share through the full provisioning pipeline.
    pub fn upsert_share(&self, name: &str, share: &Section) -> Result<ProvisionReport> {
        ProvisioningOrchestrator::new(self).run(name, share)
    }

    /// The configuration change an upsert would make, without making it.
    pub fn preview_upsert(&self, name: &str, share: &Section) -> Result<ConfigPreview> {
        check_share(name, share)?;
        let mut doc = self.store.read()?;
        let before = doc.source().to_string();
        doc.set_section(name, share.clone());
        let after = self.store.render(&doc, [name])?;
        Ok(ConfigPreview { before, after })
    }

    /// Remove a share from the configuration and reload the service.
    ///
    /// The share directory and its ACL are left alone.
    pub fn delete_share(&self, name: &str) -> Result<()> {
        let mut doc = self.store.read()?;
        self.remove_share(name, &mut doc)?;
        self.store.write(&doc, [name])?;
        tracing::info!(share = name, "Share deleted");
        self.reload()
    }

    pub fn preview_delete(&self, name: &str) -> Result<ConfigPreview> {
        let mut doc = self.store.read()?;
        let before = doc.source().to_string();
        self.remove_share(name, &mut doc)?;
        let after = self.store.render(&doc, [name])?;
        Ok(ConfigPreview { before, after })
    }

    fn remove_share(&self, name: &str, doc: &mut share_conf::ConfigDocument) -> Result<()> {
        check_share_name(name)?;
        doc.remove_section(name)
            .map(|_| ())
            .ok_or_else(|| Error::share_not_found(name))
    }

    /// The ACL currently set on a share's directory.
    pub fn share_acl(&self, name: &str) -> Result<ShareAcl> {
        let share = self.get_share(name)?;
        let path = share
            .path()
            .ok_or_else(|| Error::validation(format!("Share '{}' has no path defined", name)))?;
        Ok(self.acl.list(Path::new(path))?)
    }

    /// Re-apply the access lists of every share that has a path.
    ///
    /// Stops at the first failure. Returns the number of shares processed.
    pub fn refresh_acls(&self) -> Result<usize> {
        let doc = self.store.read()?;
        let translator = AccessPolicyTranslator::new(self.acl.as_ref());
        let mut refreshed = 0;

        for (name, share) in doc.shares() {
            let Some(path) = share.path() else {
                continue;
            };
            tracing::debug!(share = name, path, "Refreshing ACL");
            translator.apply(
                Path::new(path),
                share.get(keys::VALID_USERS),
                share.get(keys::WRITE_LIST),
            )?;
            refreshed += 1;
        }

        tracing::info!(shares = refreshed, "ACLs refreshed");
        Ok(refreshed)
    }

    /// Refresh every share's ACL, then reload the service.
    pub fn restart_service(&self) -> Result<()> {
        self.refresh_acls()?;
        self.reload()
    }

    pub fn service_status(&self) -> Result<ServiceStatus> {
        self.service.status().map_err(|source| Error::Service {
            service: self.service.name().to_string(),
            source,
        })
    }

    /// Every section of the configuration, reserved ones included.
    pub fn sections(&self) -> Result<BTreeMap<String, Section>> {
        Ok(self.store.read()?.section_map())
    }

    /// One section's parameters; a missing section reads as empty.
    pub fn get_section(&self, name: &str) -> Result<Section> {
        let doc = self.store.read()?;
        Ok(doc.section(name).cloned().unwrap_or_default())
    }

    /// Replace one section's parameters, then reload the service.
    ///
    /// Unlike share operations this may target reserved sections such as
    /// `global`, and does not provision anything.
    pub fn update_section(&self, name: &str, params: &Section) -> Result<()> {
        let sections = BTreeMap::from([(name.to_string(), params.clone())]);
        self.update_sections(&sections)
    }

    pub fn preview_update_section(&self, name: &str, params: &Section) -> Result<ConfigPreview> {
        check_section_name(name)?;
        check_params(params)?;
        let mut doc = self.store.read()?;
        let before = doc.source().to_string();
        doc.set_section(name, params.clone());
        let after = self.store.render(&doc, [name])?;
        Ok(ConfigPreview { before, after })
    }

    /// Replace several sections in one write, then reload the service.
    pub fn update_sections(&self, sections: &BTreeMap<String, Section>) -> Result<()> {
        for (name, params) in sections {
            check_section_name(name)?;
            check_params(params)?;
        }

        let mut doc = self.store.read()?;
        for (name, params) in sections {
            doc.set_section(name.as_str(), params.clone());
        }
        self.store.write(&doc, sections.keys().cloned())?;
        tracing::info!(sections = ?sections.keys().collect::<Vec<_>>(), "Sections updated");
        self.reload()
    }

    pub fn raw_config(&self) -> Result<String> {
        Ok(self.store.read_raw()?)
    }

    /// Replace the configuration file verbatim, then refresh ACLs and
    /// reload the service.
    pub fn save_raw_config(&self, text: &str) -> Result<()> {
        self.store.write_raw(text)?;
        self.restart_service()
    }

    pub fn filesystem_usage(&self) -> Result<Vec<FilesystemUsage>> {
        Ok(self.usage.filesystems()?.value)
    }

    pub fn share_usage(&self) -> Result<Vec<ShareUsage>> {
        Ok(self.usage.shares(&self.store)?.value)
    }

    fn reload(&self) -> Result<()> {
        let service = self.service.name().to_string();
        match self.service.reload() {
            Ok(()) => Ok(()),
            Err(source) => {
                tracing::warn!(%service, error = %source, "Reload failed, configuration was already written");
                Err(Error::Service { service, source })
            }
        }
    }
}
