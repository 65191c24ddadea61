//! Pure classification rules shared by the config store and the ACL translator

use serde::{Deserialize, Serialize};

/// Section names that configure the service itself and are never shares.
pub const RESERVED_SECTIONS: [&str; 3] = ["global", "printers", "print$"];

/// Whether a section name is reserved (never listed or overwritten as a share).
pub fn is_reserved_section(name: &str) -> bool {
    RESERVED_SECTIONS.contains(&name)
}

/// Kind of principal an access-list entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Group,
}

impl PrincipalKind {
    /// Qualifier used in setfacl entry specs (`u:` / `g:`).
    pub fn acl_tag(&self) -> &'static str {
        match self {
            PrincipalKind::User => "u",
            PrincipalKind::Group => "g",
        }
    }
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalKind::User => write!(f, "user"),
            PrincipalKind::Group => write!(f, "group"),
        }
    }
}

/// A classified access-list entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrincipalRef {
    pub kind: PrincipalKind,
    pub name: String,
}

/// Classify one access-list entry.
///
/// `@name` and `+name` are groups (prefix stripped); anything else is a
/// user, taken verbatim.
pub fn classify_principal(entry: &str) -> PrincipalRef {
    match entry.strip_prefix('@').or_else(|| entry.strip_prefix('+')) {
        Some(group) => PrincipalRef {
            kind: PrincipalKind::Group,
            name: group.to_string(),
        },
        None => PrincipalRef {
            kind: PrincipalKind::User,
            name: entry.to_string(),
        },
    }
}

/// Entries that name groups or special lists and are never checked
/// against the local account list (`@`, `+`, `&` prefixes).
pub fn is_opaque_reference(entry: &str) -> bool {
    entry.starts_with(['@', '+', '&'])
}

/// Split a comma-separated access list into trimmed, non-empty entries.
pub fn split_principal_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|e| !e.is_empty())
}
