//! Command implementations for share-cli

pub mod config;
pub mod diff;
pub mod service;
pub mod shares;
pub mod usage;

use share_conf::Section;

pub use config::{run_config_replace, run_config_set, run_config_show};
pub use service::{run_service_restart, run_service_status};
pub use shares::{
    run_shares_acl, run_shares_delete, run_shares_list, run_shares_refresh_acls, run_shares_set,
    run_shares_show,
};
pub use usage::{run_usage_disks, run_usage_shares};

/// How a `set` command turns its arguments into the new parameter set
#[derive(Debug, Clone, Default)]
pub struct SectionEdit {
    pub params: Vec<(String, String)>,
    pub unset: Vec<String>,
    pub replace: bool,
}

impl SectionEdit {
    /// Apply the edit on top of `current`.
    pub fn apply(&self, current: Section) -> Section {
        let mut section = if self.replace { Section::new() } else { current };
        for key in &self.unset {
            section.remove(key);
        }
        for (key, value) in &self.params {
            section.set(key.as_str(), value.as_str());
        }
        section
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.unset.is_empty() && !self.replace
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_merges_into_current() {
        let current = Section::new().with("path", "/srv/docs").with("comment", "old");
        let edit = SectionEdit {
            params: vec![("write list".into(), "alice".into())],
            unset: vec!["comment".into()],
            replace: false,
        };

        let section = edit.apply(current);

        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["path", "write list"]);
    }

    #[test]
    fn edit_with_replace_drops_current() {
        let current = Section::new().with("path", "/srv/docs");
        let edit = SectionEdit {
            params: vec![("path".into(), "/srv/other".into())],
            unset: vec![],
            replace: true,
        };

        assert_eq!(edit.apply(current), Section::new().with("path", "/srv/other"));
    }
}
