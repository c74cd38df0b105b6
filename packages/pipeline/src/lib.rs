//! # Apiforge Pipeline
//!
//! Pure regeneration pipeline for the apiforge playground.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ session: tabs + roles + options             │
//! └─────────────────────────────────────────────┘
//!                     ↓ GenerateRequest
//! ┌─────────────────────────────────────────────┐
//! │ pipeline: parse → build context → render    │
//! │  - JSON/YAML document normalization         │
//! │  - preset template resolution               │
//! │  - grouped or single-artifact output        │
//! │  - best-effort formatting                   │
//! └─────────────────────────────────────────────┘
//!                     ↓ Outcome
//! ┌─────────────────────────────────────────────┐
//! │ output tabs: artifacts shown to the user    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Pure**: generation is a function of its request, nothing else
//! 2. **Deterministic**: identical requests produce byte-identical output
//! 3. **Degrading**: malformed input means "no change", never an error
//! 4. **Delegating**: document semantics, template evaluation, and
//!    formatting all live behind collaborator traits

pub mod context;
pub mod engine;
pub mod generate;
pub mod options;
pub mod presets;

pub use context::{ContextBuilder, ContextError, Endpoint, EndpointGroup, TemplateContext};
pub use engine::{
    CompiledTemplate, FormatError, Formatter, RenderInput, TemplateEngine, TemplateError,
};
pub use generate::{
    derive_client_name, parse_document, GenerateRequest, Outcome, OutputArtifact, Pipeline,
    COMMON_ARTIFACT, INDEX_ARTIFACT,
};
pub use options::{GenerateOptions, CLIENT_NAME, GROUP_BY_FILE};
pub use presets::{PresetCatalog, PresetError};
