//! # Role Resolution
//!
//! Classifies input tabs by naming convention into the three generation
//! roles — document, template, formatter config — and maintains one
//! pointer per role. Users may keep several documents or templates open;
//! exactly one of each drives generation at a time, and a role must never
//! stay unset while a matching candidate exists.
//!
//! The convention itself is a pluggable predicate set so an alternative
//! convention can be substituted without touching the resolution policy.

use crate::tabs::{FileTab, TabList};

/// Functional category an input tab can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Document,
    Template,
    FormatterConfig,
}

pub const ALL_ROLES: [Role; 3] = [Role::Document, Role::Template, Role::FormatterConfig];

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Per-role naming predicates
pub struct RolePredicates {
    document: Predicate,
    template: Predicate,
    formatter_config: Predicate,
}

impl RolePredicates {
    /// The standard convention: structured-document extensions for the
    /// document (formatter-config names excluded), `.hbs` for the
    /// template, a `.prettier*` prefix plus `.json` for the config.
    pub fn standard() -> Self {
        Self {
            document: Box::new(|name| is_structured_doc(name) && !is_formatter_config(name)),
            template: Box::new(|name| name.ends_with(".hbs")),
            formatter_config: Box::new(is_formatter_config),
        }
    }

    pub fn new(document: Predicate, template: Predicate, formatter_config: Predicate) -> Self {
        Self {
            document,
            template,
            formatter_config,
        }
    }

    pub fn matches(&self, role: Role, name: &str) -> bool {
        match role {
            Role::Document => (self.document)(name),
            Role::Template => (self.template)(name),
            Role::FormatterConfig => (self.formatter_config)(name),
        }
    }
}

fn is_structured_doc(name: &str) -> bool {
    name.ends_with(".yml") || name.ends_with(".yaml") || name.ends_with(".json")
}

fn is_formatter_config(name: &str) -> bool {
    name.starts_with(".prettier") && name.ends_with(".json")
}

/// Which tab currently occupies each role. Each pointer is either empty
/// or names a tab the convention classifies under that role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleSelection {
    document: Option<String>,
    template: Option<String>,
    formatter_config: Option<String>,
}

impl RoleSelection {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Document => self.document.as_deref(),
            Role::Template => self.template.as_deref(),
            Role::FormatterConfig => self.formatter_config.as_deref(),
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn formatter_config(&self) -> Option<&str> {
        self.formatter_config.as_deref()
    }

    fn set(&mut self, role: Role, name: Option<String>) {
        match role {
            Role::Document => self.document = name,
            Role::Template => self.template = name,
            Role::FormatterConfig => self.formatter_config = name,
        }
    }
}

/// Maintains role pointers across structural changes to the tab list
pub struct RoleResolver {
    predicates: RolePredicates,
    selection: RoleSelection,
}

impl RoleResolver {
    pub fn new(predicates: RolePredicates) -> Self {
        Self {
            predicates,
            selection: RoleSelection::default(),
        }
    }

    pub fn standard() -> Self {
        Self::new(RolePredicates::standard())
    }

    pub fn selection(&self) -> &RoleSelection {
        &self.selection
    }

    /// Seed or repair every pointer against the list: a pointer that no
    /// longer names a matching tab rescans in list order, or clears.
    /// Valid pointers are left alone.
    pub fn resolve_all(&mut self, tabs: &TabList) {
        for role in ALL_ROLES {
            let valid = self
                .selection
                .get(role)
                .and_then(|name| tabs.find(name))
                .map(|tab| self.predicates.matches(role, &tab.name))
                .unwrap_or(false);
            if !valid {
                let found = self.first_match(tabs, role);
                self.selection.set(role, found);
            }
        }
    }

    /// A tab was added or edited and submitted. A non-empty tab claims
    /// every role it matches that is either unassigned or — when the tab
    /// is the one being selected — already held elsewhere. An existing
    /// valid assignment is never stolen by an unrelated tab.
    pub fn on_submitted(&mut self, tab: &FileTab, selected: bool) {
        if tab.content.is_empty() {
            return;
        }
        for role in ALL_ROLES {
            if !self.predicates.matches(role, &tab.name) {
                continue;
            }
            if self.selection.get(role).is_none() || selected {
                self.selection.set(role, Some(tab.name.clone()));
            }
        }
    }

    /// A tab was removed: each role it held rescans the remaining list in
    /// order, or clears when nothing matches.
    pub fn on_removed(&mut self, removed: &str, remaining: &TabList) {
        for role in ALL_ROLES {
            if self.selection.get(role) == Some(removed) {
                let found = self.first_match(remaining, role);
                self.selection.set(role, found);
            }
        }
    }

    /// Active tab content just went from empty to non-empty: the tab
    /// claims any role it matches; the other pointers stay put.
    pub fn on_first_keystroke(&mut self, tab: &FileTab) {
        for role in ALL_ROLES {
            if self.predicates.matches(role, &tab.name) {
                self.selection.set(role, Some(tab.name.clone()));
            }
        }
    }

    /// Manual tab selection re-points only roles the selected tab matches
    /// and does not already hold.
    pub fn on_selected(&mut self, tab: &FileTab) {
        for role in ALL_ROLES {
            if self.predicates.matches(role, &tab.name)
                && self.selection.get(role) != Some(tab.name.as_str())
            {
                self.selection.set(role, Some(tab.name.clone()));
            }
        }
    }

    fn first_match(&self, tabs: &TabList, role: Role) -> Option<String> {
        tabs.iter()
            .find(|tab| self.predicates.matches(role, &tab.name))
            .map(|tab| tab.name.clone())
    }
}
