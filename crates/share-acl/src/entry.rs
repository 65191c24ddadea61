//! ACL vocabulary: permissions, scopes, entries and primitive steps

use std::fmt;

use serde::{Deserialize, Serialize};
use share_conf::{PrincipalKind, PrincipalRef};

/// The two permission levels a share grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    ReadExecute,
    ReadWriteExecute,
}

impl Permission {
    /// The `rwx` triplet as written by setfacl and getfacl.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ReadExecute => "r-x",
            Permission::ReadWriteExecute => "rwx",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an entry lands.
///
/// `Immediate` entries are set on the share root only. `Inherited` entries
/// are default entries, set recursively on the root and every descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AclScope {
    Immediate,
    Inherited,
}

impl AclScope {
    pub fn is_inherited(&self) -> bool {
        matches!(self, AclScope::Inherited)
    }

    fn prefix(&self) -> &'static str {
        match self {
            AclScope::Immediate => "",
            AclScope::Inherited => "d:",
        }
    }
}

/// One named user or group grant, derived from a share's access lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessEntry {
    pub principal: PrincipalRef,
    pub permission: Permission,
    pub scope: AclScope,
}

impl AccessEntry {
    pub fn new(principal: PrincipalRef, permission: Permission, scope: AclScope) -> Self {
        Self {
            principal,
            permission,
            scope,
        }
    }

    pub fn kind(&self) -> PrincipalKind {
        self.principal.kind
    }

    pub fn name(&self) -> &str {
        &self.principal.name
    }

    /// The setfacl entry spec, e.g. `u:alice:rwx` or `d:g:eng:r-x`.
    pub fn spec(&self) -> String {
        format!(
            "{}{}:{}:{}",
            self.scope.prefix(),
            self.principal.kind.acl_tag(),
            self.principal.name,
            self.permission
        )
    }
}

/// The setfacl mask spec, e.g. `m::r-x` or `d:m::r-x`.
pub fn mask_spec(permission: Permission, scope: AclScope) -> String {
    format!("{}m::{}", scope.prefix(), permission)
}

/// A primitive ACL operation, in the order the translator issues them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AclStep {
    /// Remove every extended entry, default entries included.
    Clear,
    SetMask {
        permission: Permission,
        scope: AclScope,
    },
    SetEntry(AccessEntry),
}

impl AclStep {
    /// Short description used in logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            AclStep::Clear => "clear".to_string(),
            AclStep::SetMask { permission, scope } => format!("set {}", mask_spec(*permission, *scope)),
            AclStep::SetEntry(entry) => format!("set {}", entry.spec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use share_conf::classify_principal;

    #[rstest]
    #[case("alice", Permission::ReadWriteExecute, AclScope::Immediate, "u:alice:rwx")]
    #[case("@eng", Permission::ReadExecute, AclScope::Immediate, "g:eng:r-x")]
    #[case("+staff", Permission::ReadExecute, AclScope::Inherited, "d:g:staff:r-x")]
    #[case("bob", Permission::ReadExecute, AclScope::Inherited, "d:u:bob:r-x")]
    fn entry_spec(
        #[case] raw: &str,
        #[case] permission: Permission,
        #[case] scope: AclScope,
        #[case] expected: &str,
    ) {
        let entry = AccessEntry::new(classify_principal(raw), permission, scope);
        assert_eq!(entry.spec(), expected);
    }

    #[test]
    fn mask_specs() {
        assert_eq!(mask_spec(Permission::ReadExecute, AclScope::Immediate), "m::r-x");
        assert_eq!(mask_spec(Permission::ReadExecute, AclScope::Inherited), "d:m::r-x");
    }

    #[test]
    fn step_descriptions() {
        assert_eq!(AclStep::Clear.describe(), "clear");
        let step = AclStep::SetEntry(AccessEntry::new(
            classify_principal("@finance"),
            Permission::ReadWriteExecute,
            AclScope::Immediate,
        ));
        assert_eq!(step.describe(), "set g:finance:rwx");
    }
}
