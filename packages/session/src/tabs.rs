//! # Tab Registry
//!
//! Ordered, named content tabs with stable indices and active-selection
//! tracking. One list per side (input and output). A tab's `index` always
//! equals its position in the owning list after any mutation; removal
//! reindexes the tail and clamps the active pointer back into range.

use apiforge_pipeline::OutputArtifact;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabError {
    #[error("duplicate tab name: {0}")]
    DuplicateName(String),

    #[error("tab index out of range: {0}")]
    OutOfRange(usize),
}

/// One named content tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTab {
    pub name: String,
    pub content: String,
    pub index: usize,
    pub preset: Option<String>,
}

impl FileTab {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            index: 0,
            preset: None,
        }
    }
}

impl From<OutputArtifact> for FileTab {
    fn from(artifact: OutputArtifact) -> Self {
        Self {
            name: artifact.name,
            content: artifact.content,
            index: artifact.index,
            preset: None,
        }
    }
}

/// Patch applied to an existing tab on file-form submit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabPatch {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// Ordered tab collection with an active pointer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabList {
    tabs: Vec<FileTab>,
    active_index: usize,
}

impl TabList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from seed tabs; indices are assigned by position
    pub fn from_tabs(tabs: Vec<FileTab>) -> Self {
        let mut list = Self {
            tabs,
            active_index: 0,
        };
        list.reindex();
        list
    }

    /// Append a tab. Names are unique within a list.
    pub fn add(&mut self, mut tab: FileTab) -> Result<(), TabError> {
        if self.tabs.iter().any(|t| t.name == tab.name) {
            return Err(TabError::DuplicateName(tab.name));
        }
        tab.index = self.tabs.len();
        self.tabs.push(tab);
        Ok(())
    }

    /// Replace name/content at a fixed index. A rename must not collide
    /// with a sibling; the check runs before any mutation.
    pub fn update(&mut self, index: usize, patch: TabPatch) -> Result<(), TabError> {
        if index >= self.tabs.len() {
            return Err(TabError::OutOfRange(index));
        }
        if let Some(name) = &patch.name {
            if self
                .tabs
                .iter()
                .enumerate()
                .any(|(i, t)| i != index && t.name == *name)
            {
                return Err(TabError::DuplicateName(name.clone()));
            }
        }
        let tab = &mut self.tabs[index];
        if let Some(name) = patch.name {
            tab.name = name;
        }
        if let Some(content) = patch.content {
            tab.content = content;
        }
        Ok(())
    }

    /// Remove a tab; the tail reindexes and the active pointer clamps
    pub fn remove(&mut self, index: usize) -> Result<FileTab, TabError> {
        if index >= self.tabs.len() {
            return Err(TabError::OutOfRange(index));
        }
        let removed = self.tabs.remove(index);
        self.reindex();
        if self.tabs.is_empty() {
            self.active_index = 0;
        } else if index == self.active_index {
            self.active_index = index.min(self.tabs.len() - 1);
        } else if index < self.active_index {
            self.active_index -= 1;
        }
        Ok(removed)
    }

    /// Set the active pointer by name; silently a no-op if absent
    pub fn select(&mut self, name: &str) {
        if let Some(position) = self.tabs.iter().position(|t| t.name == name) {
            self.active_index = position;
        }
    }

    pub fn set_content(&mut self, index: usize, content: impl Into<String>) -> Result<(), TabError> {
        self.tabs
            .get_mut(index)
            .map(|tab| tab.content = content.into())
            .ok_or(TabError::OutOfRange(index))
    }

    pub fn set_preset(&mut self, index: usize, preset: Option<String>) -> Result<(), TabError> {
        self.tabs
            .get_mut(index)
            .map(|tab| tab.preset = preset)
            .ok_or(TabError::OutOfRange(index))
    }

    /// Replace the whole list (output side after a regeneration); the
    /// active pointer resets to the first tab.
    pub fn replace_all(&mut self, tabs: Vec<FileTab>) {
        self.tabs = tabs;
        self.reindex();
        self.active_index = 0;
    }

    pub fn active(&self) -> Option<&FileTab> {
        self.tabs.get(self.active_index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn get(&self, index: usize) -> Option<&FileTab> {
        self.tabs.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&FileTab> {
        self.tabs.iter().find(|t| t.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileTab> {
        self.tabs.iter()
    }

    fn reindex(&mut self) {
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            tab.index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> TabList {
        TabList::from_tabs(names.iter().map(|n| FileTab::new(*n, "x")).collect())
    }

    fn assert_contiguous(list: &TabList) {
        for (position, tab) in list.iter().enumerate() {
            assert_eq!(tab.index, position, "index drifted for {}", tab.name);
        }
    }

    #[test]
    fn test_add_assigns_next_index() {
        let mut list = list_of(&["a", "b"]);
        list.add(FileTab::new("c", "")).unwrap();
        assert_eq!(list.find("c").unwrap().index, 2);
        assert_contiguous(&list);
    }

    #[test]
    fn test_add_duplicate_name_rejected() {
        let mut list = list_of(&["a"]);
        let err = list.add(FileTab::new("a", "")).unwrap_err();
        assert_eq!(err, TabError::DuplicateName("a".to_string()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_rename_collision_rejected_without_mutation() {
        let mut list = list_of(&["a", "b"]);
        let err = list
            .update(
                1,
                TabPatch {
                    name: Some("a".to_string()),
                    content: Some("changed".to_string()),
                },
            )
            .unwrap_err();
        assert_eq!(err, TabError::DuplicateName("a".to_string()));
        // Content untouched: the check runs before any mutation
        assert_eq!(list.get(1).unwrap().content, "x");
    }

    #[test]
    fn test_remove_reindexes_tail() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        list.remove(1).unwrap();
        assert_eq!(
            list.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "c", "d"]
        );
        assert_contiguous(&list);
    }

    #[test]
    fn test_remove_active_clamps_pointer() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select("c");
        list.remove(2).unwrap();
        assert_eq!(list.active().unwrap().name, "b");
    }

    #[test]
    fn test_remove_before_active_follows_same_tab() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select("c");
        list.remove(0).unwrap();
        assert_eq!(list.active().unwrap().name, "c");
        assert_contiguous(&list);
    }

    #[test]
    fn test_select_missing_is_noop() {
        let mut list = list_of(&["a", "b"]);
        list.select("b");
        list.select("nope");
        assert_eq!(list.active().unwrap().name, "b");
    }

    #[test]
    fn test_reindex_invariant_over_mixed_sequence() {
        let mut list = list_of(&["a", "b", "c"]);
        list.remove(0).unwrap();
        list.add(FileTab::new("d", "")).unwrap();
        list.remove(1).unwrap();
        list.add(FileTab::new("e", "")).unwrap();
        assert_contiguous(&list);
    }

    #[test]
    fn test_replace_all_resets_active() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select("c");
        list.replace_all(vec![FileTab::new("x", ""), FileTab::new("y", "")]);
        assert_eq!(list.active().unwrap().name, "x");
        assert_contiguous(&list);
    }
}
