//! # Generation Options
//!
//! An opaque option set: a mapping of option keys to JSON values whose
//! recognized keys are enumerated by the options form, not here. The
//! pipeline itself reads exactly two keys (`groupByFile`, `clientName`);
//! everything else flows through to the template context builder untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option key: emit one artifact per endpoint group instead of a single file
pub const GROUP_BY_FILE: &str = "groupByFile";

/// Option key: name of the generated client type
pub const CLIENT_NAME: &str = "clientName";

/// Opaque set of generation options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerateOptions(Map<String, Value>);

impl GenerateOptions {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether the grouped (one artifact per endpoint group) strategy is on
    pub fn group_by_file(&self) -> bool {
        self.get(GROUP_BY_FILE)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn client_name(&self) -> Option<&str> {
        self.get(CLIENT_NAME).and_then(Value::as_str)
    }

    /// Per-group option override used in grouped mode: forces the
    /// single-file strategy and pins the client name derived from the group.
    pub fn with_group_override(&self, client_name: &str) -> Self {
        let mut options = self.clone();
        options.set(GROUP_BY_FILE, false);
        options.set(CLIENT_NAME, client_name);
        options
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for GenerateOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
