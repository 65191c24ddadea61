//! Ordered parameter sets

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Well-known parameter names of a share definition
pub mod keys {
    pub const PATH: &str = "path";
    pub const VALID_USERS: &str = "valid users";
    pub const WRITE_LIST: &str = "write list";
    pub const OWNER: &str = "owner";
    pub const GROUP: &str = "group";
    pub const PERMISSIONS: &str = "permissions";
}

/// The parameters of one configuration section.
///
/// Keeps insertion order so that writes are reproducible and diffs stay
/// small. Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct Section {
    params: Vec<(String, String)>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter value by exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a parameter, returning the previous value if there was one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.params.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`Section::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.params.iter().position(|(k, _)| k == key)?;
        Some(self.params.remove(pos).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The share's `path` parameter, if set and non-empty.
    pub fn path(&self) -> Option<&str> {
        self.get(keys::PATH).filter(|p| !p.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (k, v) in iter {
            section.set(k, v);
        }
        section
    }
}

impl From<BTreeMap<String, String>> for Section {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for (k, v) in &self.params {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
