//! # Rendering and Formatting Seams
//!
//! The pipeline drives a template engine and a code formatter through these
//! traits; it interprets neither the template language nor the formatting
//! rules. Compile once, render per artifact.

use serde_json::Value;
use thiserror::Error;

use crate::context::TemplateContext;
use crate::options::GenerateOptions;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template compile error: {0}")]
    Compile(String),

    #[error("template render error: {0}")]
    Render(String),
}

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("format error: {0}")]
    Format(String),
}

/// Everything a template sees during one render
pub struct RenderInput<'a> {
    pub context: &'a TemplateContext,
    pub options: &'a GenerateOptions,
}

/// Template engine seam
pub trait TemplateEngine {
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledTemplate>, TemplateError>;
}

/// A compiled template, renderable any number of times
pub trait CompiledTemplate {
    fn render(&self, input: &RenderInput<'_>) -> Result<String, TemplateError>;
}

/// Code formatter seam. Best-effort at every call site: a failing format
/// never fails generation.
pub trait Formatter {
    fn format(&self, text: &str, config: &Value) -> Result<String, FormatError>;
}
