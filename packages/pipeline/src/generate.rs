//! # Regeneration Pipeline
//!
//! Transforms (document, template, formatter config, options, preset
//! catalog) into output artifacts.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Generation is fully deterministic.**
//!
//! For any fixed [`GenerateRequest`], `generate()` produces byte-identical
//! output on every invocation:
//!
//! - No time/random/environment dependence
//! - No hash iteration order leaks (groups and schemas are insertion-ordered)
//! - Collaborators are required to be pure with respect to their inputs
//!
//! Determinism is what makes the pipeline safe to re-run on every keystroke
//! and memoizable by input fingerprint later without behavior change.
//!
//! ## Error Recovery
//!
//! Malformed inputs are routine while the user types. Every failure on the
//! document/template path degrades to [`Outcome::Unchanged`], keeping the
//! last good output visible. Only formatting is allowed to fail per
//! artifact — the unformatted render is emitted instead.

use apiforge_common::CommonResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::context::{ContextBuilder, TemplateContext};
use crate::engine::{CompiledTemplate, Formatter, RenderInput, TemplateEngine};
use crate::options::GenerateOptions;
use crate::presets::PresetCatalog;

/// Name of the synthetic re-export artifact in grouped mode
pub const INDEX_ARTIFACT: &str = "index.ts";

/// Name of the shared-schema artifact in grouped mode
pub const COMMON_ARTIFACT: &str = "common.ts";

/// One generated output unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputArtifact {
    pub name: String,
    pub content: String,
    pub index: usize,
}

/// Everything one regeneration reads, borrowed from session state
#[derive(Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub document: &'a str,
    pub template_name: &'a str,
    pub template_content: &'a str,
    pub template_preset: Option<&'a str>,
    pub formatter_config: &'a str,
    pub options: &'a GenerateOptions,
    pub catalog: &'a PresetCatalog,
    /// Name of the single artifact in non-grouped mode
    pub output_name: &'a str,
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Inputs were unusable; the previous output stays as-is
    Unchanged,
    /// Fresh artifacts replacing the whole output list
    Artifacts(Vec<OutputArtifact>),
}

/// Pure transformation from session inputs to output artifacts
pub struct Pipeline {
    context_builder: Box<dyn ContextBuilder + Send>,
    template_engine: Box<dyn TemplateEngine + Send>,
    formatter: Box<dyn Formatter + Send>,
}

impl Pipeline {
    pub fn new(
        context_builder: Box<dyn ContextBuilder + Send>,
        template_engine: Box<dyn TemplateEngine + Send>,
        formatter: Box<dyn Formatter + Send>,
    ) -> Self {
        Self {
            context_builder,
            template_engine,
            formatter,
        }
    }

    /// Run one regeneration
    pub fn generate(&self, request: &GenerateRequest<'_>) -> Outcome {
        if request.document.trim().is_empty() {
            return Outcome::Unchanged;
        }

        let document = match parse_document(request.document) {
            Ok(value) => value,
            Err(err) => {
                debug!("document parse failed: {err}");
                return Outcome::Unchanged;
            }
        };

        let context = match self.context_builder.build_context(&document, request.options) {
            Ok(context) => context,
            Err(err) => {
                debug!("context build failed: {err}");
                return Outcome::Unchanged;
            }
        };

        let Some(template) = resolve_template(request) else {
            return Outcome::Unchanged;
        };

        let compiled = match self.template_engine.compile(template) {
            Ok(compiled) => compiled,
            Err(err) => {
                debug!("template compile failed: {err}");
                return Outcome::Unchanged;
            }
        };

        let config = parse_formatter_config(request.formatter_config);

        let artifacts = if request.options.group_by_file() {
            match self.generate_grouped(compiled.as_ref(), &context, request.options, &config) {
                Some(artifacts) => artifacts,
                None => return Outcome::Unchanged,
            }
        } else {
            let input = RenderInput {
                context: &context,
                options: request.options,
            };
            let text = match compiled.render(&input) {
                Ok(text) => text,
                Err(err) => {
                    debug!("template render failed: {err}");
                    return Outcome::Unchanged;
                }
            };
            vec![OutputArtifact {
                name: request.output_name.to_string(),
                content: self.format_best_effort(text, &config),
                index: 0,
            }]
        };

        Outcome::Artifacts(artifacts)
    }

    /// Grouped strategy: synthetic index first, then the shared-schema
    /// artifact when any schemas are common, then one artifact per group in
    /// discovery order.
    fn generate_grouped(
        &self,
        template: &dyn CompiledTemplate,
        context: &TemplateContext,
        options: &GenerateOptions,
        config: &Value,
    ) -> Option<Vec<OutputArtifact>> {
        let mut artifacts = vec![OutputArtifact {
            name: INDEX_ARTIFACT.to_string(),
            content: render_index(context),
            index: 0,
        }];

        if !context.common_schemas.is_empty() {
            let scoped = context.scoped_to_common();
            let input = RenderInput {
                context: &scoped,
                options,
            };
            let text = match template.render(&input) {
                Ok(text) => text,
                Err(err) => {
                    debug!("common artifact render failed: {err}");
                    return None;
                }
            };
            artifacts.push(OutputArtifact {
                name: COMMON_ARTIFACT.to_string(),
                content: self.format_best_effort(text, config),
                index: 0,
            });
        }

        for name in context.groups.keys() {
            let scoped = context.scoped_to_group(name);
            let overridden = options.with_group_override(&derive_client_name(name));
            let input = RenderInput {
                context: &scoped,
                options: &overridden,
            };
            let text = match template.render(&input) {
                Ok(text) => text,
                Err(err) => {
                    debug!("group '{name}' render failed: {err}");
                    return None;
                }
            };
            artifacts.push(OutputArtifact {
                name: format!("{name}.ts"),
                content: self.format_best_effort(text, config),
                index: 0,
            });
        }

        for (index, artifact) in artifacts.iter_mut().enumerate() {
            artifact.index = index;
        }

        Some(artifacts)
    }

    fn format_best_effort(&self, text: String, config: &Value) -> String {
        match self.formatter.format(&text, config) {
            Ok(formatted) => formatted,
            Err(err) => {
                debug!("formatting failed, emitting unformatted output: {err}");
                text
            }
        }
    }
}

/// Parse the raw document: JSON if the content opens an object, the
/// YAML-equivalent structured format otherwise. Both normalize to a
/// `serde_json::Value` tree.
pub fn parse_document(raw: &str) -> CommonResult<Value> {
    if raw.trim_start().starts_with('{') {
        Ok(serde_json::from_str(raw)?)
    } else {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// Formatter config is JSON; absence or a parse failure degrades to an
/// empty configuration, never to an error.
fn parse_formatter_config(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Template text for one generation: a preset id (explicit on the tab, or
/// the tab name itself) resolves through the catalog; anything else uses
/// the tab's own content.
fn resolve_template<'a>(request: &GenerateRequest<'a>) -> Option<&'a str> {
    let text = request
        .template_preset
        .and_then(|id| request.catalog.get(id))
        .or_else(|| request.catalog.get(request.template_name))
        .unwrap_or(request.template_content);

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// PascalCase client name derived from a group name
pub fn derive_client_name(group: &str) -> String {
    group
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Synthetic index artifact: one re-export line per group, discovery order
fn render_index(context: &TemplateContext) -> String {
    let mut out = String::new();
    for name in context.groups.keys() {
        out.push_str("export * from \"./");
        out.push_str(name);
        out.push_str("\";\n");
    }
    out
}
