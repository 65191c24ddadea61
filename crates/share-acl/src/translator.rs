//! Share access lists to ACL operations

use std::path::Path;

use share_conf::{classify_principal, split_principal_list};

use crate::backend::AclBackend;
use crate::entry::{AccessEntry, AclScope, AclStep, Permission};
use crate::error::Result;

/// Applies a share's `valid users` / `write list` to its root directory.
pub struct AccessPolicyTranslator<'a> {
    backend: &'a dyn AclBackend,
}

impl<'a> AccessPolicyTranslator<'a> {
    pub fn new(backend: &'a dyn AclBackend) -> Self {
        Self { backend }
    }

    /// Compute the ordered operations for the given access lists.
    ///
    /// Returns no steps when both lists are absent. A present but empty list
    /// still clears the existing ACL and sets the masks.
    pub fn plan(valid_users: Option<&str>, write_list: Option<&str>) -> Vec<AclStep> {
        if valid_users.is_none() && write_list.is_none() {
            return Vec::new();
        }

        let grants = |scope: AclScope| {
            let readers = valid_users
                .into_iter()
                .flat_map(split_principal_list)
                .map(move |e| (e, Permission::ReadExecute));
            let writers = write_list
                .into_iter()
                .flat_map(split_principal_list)
                .map(move |e| (e, Permission::ReadWriteExecute));
            readers.chain(writers).map(move |(raw, permission)| {
                AclStep::SetEntry(AccessEntry::new(classify_principal(raw), permission, scope))
            })
        };

        let mut steps = vec![
            AclStep::Clear,
            AclStep::SetMask {
                permission: Permission::ReadExecute,
                scope: AclScope::Immediate,
            },
        ];
        steps.extend(grants(AclScope::Immediate));
        steps.push(AclStep::SetMask {
            permission: Permission::ReadExecute,
            scope: AclScope::Inherited,
        });
        steps.extend(grants(AclScope::Inherited));
        steps
    }

    /// Replace the ACL of `path` to match the access lists.
    ///
    /// Steps run strictly in order; the first failure aborts the rest and
    /// is returned. Returns the number of operations performed.
    pub fn apply(&self, path: &Path, valid_users: Option<&str>, write_list: Option<&str>) -> Result<usize> {
        let steps = Self::plan(valid_users, write_list);
        if steps.is_empty() {
            tracing::debug!(path = %path.display(), "No access lists, leaving ACL untouched");
            return Ok(0);
        }

        for step in &steps {
            tracing::debug!(path = %path.display(), step = %step.describe(), "Applying ACL step");
            self.backend.apply_step(path, step)?;
        }

        tracing::info!(path = %path.display(), operations = steps.len(), "ACL applied");
        Ok(steps.len())
    }
}
