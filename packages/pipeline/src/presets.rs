//! # Preset Catalog
//!
//! Bundled preset templates, keyed by preset id. The catalog is fetched
//! once per session by an external loader and treated as read-only after
//! load; merging is idempotent so a late-arriving fetch result can always
//! be applied.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("preset fetch failed: {0}")]
    Fetch(String),
}

/// Preset id → raw template text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetCatalog {
    templates: IndexMap<String, String>,
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(id.into(), template.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.templates.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Merge another catalog in; later entries win on id collision
    pub fn merge(&mut self, other: PresetCatalog) {
        self.templates.extend(other.templates);
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.templates.iter()
    }
}

impl FromIterator<(String, String)> for PresetCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_idempotent() {
        let mut catalog = PresetCatalog::new();
        catalog.insert("fetch", "{{endpoints}}");

        let snapshot = catalog.clone();
        catalog.merge(snapshot.clone());

        assert_eq!(catalog, snapshot);
    }

    #[test]
    fn test_merge_adds_new_entries() {
        let mut catalog = PresetCatalog::new();
        catalog.insert("fetch", "a");

        let mut incoming = PresetCatalog::new();
        incoming.insert("axios", "b");
        catalog.merge(incoming);

        assert_eq!(catalog.get("fetch"), Some("a"));
        assert_eq!(catalog.get("axios"), Some("b"));
        assert_eq!(catalog.len(), 2);
    }
}
