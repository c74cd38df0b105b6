//! # Template Context
//!
//! The semantic model a template renders against: endpoint groups, schemas,
//! type names, and the set of schema names shared across groups. The model
//! is built by an external collaborator ([`ContextBuilder`]); this module
//! only defines the shape and the narrowing operations the grouped output
//! strategy needs.
//!
//! Iteration order of `groups` and `schemas` is their discovery order.
//! Output artifact ordering depends on it, so both are insertion-ordered
//! maps rather than hash maps.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::options::GenerateOptions;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("unsupported document: {0}")]
    Unsupported(String),

    #[error("invalid document structure: {0}")]
    Invalid(String),
}

/// One callable operation described by the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub method: String,
    pub path: String,
}

/// Endpoints sharing one API group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointGroup {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}

/// Semantic model handed to the template engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateContext {
    pub groups: IndexMap<String, EndpointGroup>,
    pub schemas: IndexMap<String, Value>,
    pub type_names: Vec<String>,
    pub common_schemas: IndexSet<String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow to a single endpoint group.
    ///
    /// Shared schemas belong to the common artifact, so they are filtered
    /// out here; non-shared schemas and type names stay visible to the
    /// template.
    pub fn scoped_to_group(&self, group: &str) -> Self {
        let groups = self
            .groups
            .get(group)
            .map(|g| IndexMap::from([(group.to_string(), g.clone())]))
            .unwrap_or_default();

        Self {
            groups,
            schemas: self
                .schemas
                .iter()
                .filter(|(name, _)| !self.common_schemas.contains(*name))
                .map(|(name, schema)| (name.clone(), schema.clone()))
                .collect(),
            type_names: self
                .type_names
                .iter()
                .filter(|name| !self.common_schemas.contains(*name))
                .cloned()
                .collect(),
            common_schemas: IndexSet::new(),
        }
    }

    /// Narrow to the shared ("common") schema set: no endpoints, only the
    /// schemas and type names marked common across groups.
    pub fn scoped_to_common(&self) -> Self {
        Self {
            groups: IndexMap::new(),
            schemas: self
                .schemas
                .iter()
                .filter(|(name, _)| self.common_schemas.contains(*name))
                .map(|(name, schema)| (name.clone(), schema.clone()))
                .collect(),
            type_names: self
                .type_names
                .iter()
                .filter(|name| self.common_schemas.contains(*name))
                .cloned()
                .collect(),
            common_schemas: self.common_schemas.clone(),
        }
    }
}

/// Builds the semantic model from a parsed document.
///
/// External collaborator: the pipeline never inspects document semantics
/// itself, and treats any failure here as "no change".
pub trait ContextBuilder {
    fn build_context(
        &self,
        document: &Value,
        options: &GenerateOptions,
    ) -> Result<TemplateContext, ContextError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context_with_two_groups() -> TemplateContext {
        let mut context = TemplateContext::new();
        context.groups.insert(
            "pets".to_string(),
            EndpointGroup {
                name: "pets".to_string(),
                endpoints: vec![Endpoint {
                    name: "listPets".to_string(),
                    method: "get".to_string(),
                    path: "/pets".to_string(),
                }],
            },
        );
        context.groups.insert(
            "stores".to_string(),
            EndpointGroup {
                name: "stores".to_string(),
                endpoints: vec![],
            },
        );
        context.schemas.insert("Pet".to_string(), json!({"type": "object"}));
        context.schemas.insert("Error".to_string(), json!({"type": "object"}));
        context.type_names = vec!["Pet".to_string(), "Error".to_string()];
        context.common_schemas.insert("Error".to_string());
        context
    }

    #[test]
    fn test_scoped_to_group_keeps_only_that_group() {
        let context = context_with_two_groups();
        let scoped = context.scoped_to_group("pets");

        assert_eq!(scoped.groups.len(), 1);
        assert!(scoped.groups.contains_key("pets"));
        // Shared schemas are carved out into the common artifact
        assert!(scoped.schemas.contains_key("Pet"));
        assert!(!scoped.schemas.contains_key("Error"));
        assert!(scoped.common_schemas.is_empty());
    }

    #[test]
    fn test_scoped_to_common_keeps_only_shared_schemas() {
        let context = context_with_two_groups();
        let scoped = context.scoped_to_common();

        assert!(scoped.groups.is_empty());
        assert_eq!(scoped.schemas.len(), 1);
        assert!(scoped.schemas.contains_key("Error"));
        assert_eq!(scoped.type_names, vec!["Error".to_string()]);
    }

    #[test]
    fn test_scoped_to_missing_group_is_empty() {
        let context = context_with_two_groups();
        let scoped = context.scoped_to_group("nope");
        assert!(scoped.groups.is_empty());
    }
}
