//! # Session Bootstrap
//!
//! The literal seed values — default document, template, formatter config,
//! output tab name, default options — are owned by the preset/bootstrap
//! collaborator. The core only consumes them.

use apiforge_pipeline::GenerateOptions;
use serde::{Deserialize, Serialize};

/// Seed for one input tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSeed {
    pub name: String,
    pub content: String,
}

impl TabSeed {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Everything a fresh session starts from
#[derive(Debug, Clone)]
pub struct SessionBootstrap {
    pub document: TabSeed,
    pub template: TabSeed,
    pub formatter_config: TabSeed,
    /// Name of the single output tab in non-grouped mode
    pub output_name: String,
    pub default_options: GenerateOptions,
}
