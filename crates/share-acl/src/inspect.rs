//! Reading back the ACL of a share root

use serde::{Deserialize, Serialize};
use share_conf::PrincipalKind;

/// One named user or group entry as reported by getfacl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclEntryView {
    #[serde(rename = "type")]
    pub kind: PrincipalKind,
    pub principal: String,
    pub permission: String,
    pub is_default: bool,
}

/// The ACL currently in effect on a share root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAcl {
    pub path: String,
    pub owner: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mask: Option<String>,
    pub entries: Vec<AclEntryView>,
}

impl ShareAcl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Look up the permission string of a named entry.
    pub fn permission_of(&self, kind: PrincipalKind, principal: &str, is_default: bool) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.principal == principal && e.is_default == is_default)
            .map(|e| e.permission.as_str())
    }

    pub fn immediate(&self) -> impl Iterator<Item = &AclEntryView> {
        self.entries.iter().filter(|e| !e.is_default)
    }

    pub fn defaults(&self) -> impl Iterator<Item = &AclEntryView> {
        self.entries.iter().filter(|e| e.is_default)
    }
}

/// Parse `getfacl -p` output.
///
/// Owner and group come from the `# owner:` / `# group:` header comments.
/// Only named user and group entries are listed; the owning user, owning
/// group and `other` entries are omitted, masks are reported separately.
/// Trailing `#effective:` annotations are dropped.
pub fn parse_getfacl(path: &str, output: &str) -> ShareAcl {
    let mut acl = ShareAcl::new(path);

    for line in output.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if let Some(owner) = line.strip_prefix("# owner:") {
            acl.owner = owner.trim().to_string();
            continue;
        }
        if let Some(group) = line.strip_prefix("# group:") {
            acl.group = group.trim().to_string();
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let (is_default, spec) = match line.strip_prefix("default:") {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let mut parts = spec.splitn(3, ':');
        let (Some(tag), Some(qualifier)) = (parts.next(), parts.next()) else {
            continue;
        };
        let permission = parts
            .next()
            .and_then(|p| p.split(['#', ' ', '\t']).next())
            .unwrap_or_default()
            .to_string();

        let kind = match tag {
            "user" => PrincipalKind::User,
            "group" => PrincipalKind::Group,
            "mask" => {
                if is_default {
                    acl.default_mask = Some(permission);
                } else {
                    acl.mask = Some(permission);
                }
                continue;
            }
            _ => continue,
        };
        if qualifier.is_empty() {
            continue;
        }
        acl.entries.push(AclEntryView {
            kind,
            principal: qualifier.to_string(),
            permission,
            is_default,
        });
    }

    acl
}
