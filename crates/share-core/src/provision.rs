//! The share provisioning pipeline

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use share_acl::{AccessPolicyTranslator, validate_users};
use share_conf::{ConfigDocument, Section, keys};

use crate::context::AdminContext;
use crate::error::{Error, Result};
use crate::validate::{check_share, parse_permissions};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStage {
    Validating,
    DirectoryEnsured,
    OwnershipApplied,
    AclApplied,
    ConfigPersisted,
    ServiceReloaded,
}

impl fmt::Display for ProvisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProvisionStage::Validating => "validating",
            ProvisionStage::DirectoryEnsured => "directory",
            ProvisionStage::OwnershipApplied => "ownership",
            ProvisionStage::AclApplied => "acl",
            ProvisionStage::ConfigPersisted => "config write",
            ProvisionStage::ServiceReloaded => "service reload",
        };
        f.write_str(name)
    }
}

/// What a provisioning run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub share: String,
    /// Stages that completed, in order
    pub completed: Vec<ProvisionStage>,
    /// Human-readable description of every change made
    pub actions: Vec<String>,
}

impl ProvisionReport {
    fn new(share: &str) -> Self {
        Self {
            share: share.to_string(),
            completed: Vec::new(),
            actions: Vec::new(),
        }
    }
}

/// Drives a share definition through validation, directory, ownership,
/// ACL, configuration write and service reload.
///
/// The first failing stage aborts the run. Nothing already done is rolled
/// back: the stages are idempotent, so re-running the same request
/// converges.
pub struct ProvisioningOrchestrator<'a> {
    ctx: &'a AdminContext,
}

impl<'a> ProvisioningOrchestrator<'a> {
    pub fn new(ctx: &'a AdminContext) -> Self {
        Self { ctx }
    }

    pub fn run(&self, name: &str, share: &Section) -> Result<ProvisionReport> {
        let mut report = ProvisionReport::new(name);
        tracing::debug!(share = name, "Provisioning share");

        let (path, mut doc) = step(&mut report, ProvisionStage::Validating, |_| self.validate(name, share))?;

        step(&mut report, ProvisionStage::DirectoryEnsured, |actions| {
            if self.ctx.host.ensure_dir(&path)? {
                actions.push(format!("Created directory {}", path.display()));
            }
            Ok(())
        })?;

        step(&mut report, ProvisionStage::OwnershipApplied, |actions| {
            self.apply_ownership(&path, share, actions)
        })?;

        step(&mut report, ProvisionStage::AclApplied, |actions| {
            let translator = AccessPolicyTranslator::new(self.ctx.acl.as_ref());
            let operations = translator.apply(&path, share.get(keys::VALID_USERS), share.get(keys::WRITE_LIST))?;
            if operations > 0 {
                actions.push(format!("Applied {} ACL operations to {}", operations, path.display()));
            }
            Ok(())
        })?;

        step(&mut report, ProvisionStage::ConfigPersisted, |actions| {
            doc.set_section(name, share.clone());
            self.ctx.store.write(&doc, [name])?;
            actions.push(format!("Wrote [{}] to {}", name, self.ctx.store.path().display()));
            Ok(())
        })?;

        step(&mut report, ProvisionStage::ServiceReloaded, |actions| {
            let service = self.ctx.service.name().to_string();
            self.ctx
                .service
                .reload()
                .map_err(|source| Error::Service {
                    service: service.clone(),
                    source,
                })?;
            actions.push(format!("Reloaded {}", service));
            Ok(())
        })?;

        tracing::info!(share = name, actions = report.actions.len(), "Share provisioned");
        Ok(report)
    }

    fn validate(&self, name: &str, share: &Section) -> Result<(PathBuf, ConfigDocument)> {
        let path = check_share(name, share)?;
        validate_users(share, self.ctx.directory.as_ref()).map_err(|e| match e {
            share_acl::Error::UnknownPrincipal { .. } => Error::validation(e.to_string()),
            other => Error::Acl(other),
        })?;
        let doc = self.ctx.store.read()?;
        Ok((PathBuf::from(path), doc))
    }

    fn apply_ownership(&self, path: &Path, share: &Section, actions: &mut Vec<String>) -> Result<()> {
        let owner = share.get(keys::OWNER).filter(|v| !v.is_empty());
        let group = share.get(keys::GROUP).filter(|v| !v.is_empty());
        if owner.is_some() || group.is_some() {
            self.ctx.host.chown(path, owner, group)?;
            actions.push(format!(
                "Set ownership of {} to {}:{}",
                path.display(),
                owner.unwrap_or(""),
                group.unwrap_or("")
            ));
        }

        if let Some(permissions) = share.get(keys::PERMISSIONS) {
            let mode = parse_permissions(permissions)?;
            self.ctx.host.chmod(path, mode)?;
            actions.push(format!("Set mode {:04o} on {}", mode, path.display()));
        }
        Ok(())
    }
}

/// Run one stage, recording it as completed or wrapping its failure.
fn step<T, F>(report: &mut ProvisionReport, stage: ProvisionStage, f: F) -> Result<T>
where
    F: FnOnce(&mut Vec<String>) -> Result<T>,
{
    match f(&mut report.actions) {
        Ok(value) => {
            report.completed.push(stage);
            Ok(value)
        }
        Err(source) => {
            tracing::warn!(share = %report.share, %stage, error = %source, "Provisioning stage failed");
            Err(Error::Provision {
                share: report.share.clone(),
                stage,
                source: Box::new(source),
            })
        }
    }
}
