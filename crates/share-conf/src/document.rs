//! In-memory view of the configuration file

use std::collections::BTreeMap;

use crate::classify::is_reserved_section;
use crate::line::{LineKind, classify, split_lines};
use crate::section::Section;

/// A parsed configuration file.
///
/// Holds every section (reserved ones included) in file order, plus the
/// original text so unmodified content can be reproduced byte for byte.
/// Shares are the non-reserved sections; see [`ConfigDocument::shares`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<(String, Section)>,
    source: String,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration text.
    ///
    /// Headers open sections; `key = value` lines inside a section assign
    /// trimmed parameters (a repeated key keeps the last value, a repeated
    /// header continues the first section). Blank lines, comments,
    /// parameters before the first header and unrecognized lines are
    /// skipped.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self {
            sections: Vec::new(),
            source: text.to_string(),
        };
        let mut current: Option<usize> = None;
        let mut skipped = 0usize;

        for raw in split_lines(text) {
            match classify(raw) {
                LineKind::Header(name) => {
                    current = Some(doc.index_or_insert(&name));
                }
                LineKind::Param { key, value } => match current {
                    Some(idx) => {
                        doc.sections[idx].1.set(key, value);
                    }
                    None => skipped += 1,
                },
                LineKind::Other => skipped += 1,
                LineKind::Blank | LineKind::Comment => {}
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "Skipped unrecognized configuration lines");
        }
        doc
    }

    /// The text this document was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Insert or replace a section, returning the previous parameters.
    ///
    /// New sections are placed after the existing ones.
    pub fn set_section(&mut self, name: impl Into<String>, section: Section) -> Option<Section> {
        let name = name.into();
        match self.section_mut(&name) {
            Some(existing) => Some(std::mem::replace(existing, section)),
            None => {
                self.sections.push((name, section));
                None
            }
        }
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        let pos = self.sections.iter().position(|(n, _)| n == name)?;
        Some(self.sections.remove(pos).1)
    }

    /// All sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(n, _)| n.as_str())
    }

    /// Share definitions: every section that is not reserved, in file order.
    pub fn shares(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections().filter(|(name, _)| !is_reserved_section(name))
    }

    /// Share definitions keyed by name.
    pub fn share_map(&self) -> BTreeMap<String, Section> {
        self.shares()
            .map(|(name, section)| (name.to_string(), section.clone()))
            .collect()
    }

    /// All sections keyed by name.
    pub fn section_map(&self) -> BTreeMap<String, Section> {
        self.sections()
            .map(|(name, section)| (name.to_string(), section.clone()))
            .collect()
    }

    fn index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.sections.push((name.to_string(), Section::new()));
                self.sections.len() - 1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
# Samba configuration
[global]
   workgroup = WORKGROUP
   server string = %h server

[printers]
   browseable = no

[docs]
   path = /srv/docs
   ; read only by default
   read only = yes
   valid users = bob, @eng
";

    #[test]
    fn parses_all_sections_in_order() {
        let doc = ConfigDocument::parse(SAMPLE);
        assert_eq!(
            doc.section_names().collect::<Vec<_>>(),
            vec!["global", "printers", "docs"]
        );
        assert_eq!(doc.section("global").unwrap().get("workgroup"), Some("WORKGROUP"));
    }

    #[test]
    fn shares_exclude_reserved_sections() {
        let doc = ConfigDocument::parse(SAMPLE);
        let shares = doc.share_map();
        assert_eq!(shares.keys().collect::<Vec<_>>(), vec!["docs"]);
        assert_eq!(shares["docs"].get("valid users"), Some("bob, @eng"));
        assert_eq!(shares["docs"].len(), 3);
    }

    #[test]
    fn params_before_first_header_are_ignored() {
        let doc = ConfigDocument::parse("orphan = 1\n[a]\nx = 2\n");
        assert_eq!(doc.section("a").unwrap().len(), 1);
    }

    #[test]
    fn duplicate_headers_merge_with_last_value_winning() {
        let doc = ConfigDocument::parse("[a]\nx = 1\ny = 1\n[b]\n[a]\nx = 2\n");
        let a = doc.section("a").unwrap();
        assert_eq!(a.get("x"), Some("2"));
        assert_eq!(a.get("y"), Some("1"));
        assert_eq!(doc.section_names().count(), 2);
    }

    #[test]
    fn empty_section_is_still_a_share() {
        let doc = ConfigDocument::parse("[empty]\n");
        assert!(doc.share_map().contains_key("empty"));
    }

    #[test]
    fn set_and_remove_section() {
        let mut doc = ConfigDocument::parse(SAMPLE);
        doc.set_section("media", Section::new().with("path", "/srv/media"));
        assert_eq!(doc.section_names().last(), Some("media"));

        let removed = doc.remove_section("docs").unwrap();
        assert_eq!(removed.path(), Some("/srv/docs"));
        assert!(!doc.contains("docs"));
    }

    #[test]
    fn keeps_source_text() {
        let doc = ConfigDocument::parse(SAMPLE);
        assert_eq!(doc.source(), SAMPLE);
    }
}
