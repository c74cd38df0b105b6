//! # Apiforge Session
//!
//! Session controller core for the apiforge playground: named input tabs
//! for a specification document, a rendering template, and a formatter
//! config; generated output tabs; and the state machine that decides, on
//! every edit, what to regenerate and from which inputs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ events: editor + UI actions                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: state machine                      │
//! │  - tabs: ordered named content tabs         │
//! │  - roles: document/template/config pointers │
//! │  - options: committed vs draft sets         │
//! │  - catalog: background preset fetch         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ pipeline: pure regeneration (apiforge-      │
//! │ pipeline) → output tabs                     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Single actor**: one event at a time, run to completion, no locks
//! 2. **Total transitions**: every event in every state acts or is a
//!    logged no-op
//! 3. **Roles never dangle**: a role pointer is empty or names a tab the
//!    convention classifies under that role
//! 4. **Degrading generation**: malformed input keeps the last good output
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apiforge_session::{Session, SessionEvent};
//!
//! let mut session = Session::new(bootstrap, pipeline);
//! session.handle(SessionEvent::InputSurfaceAttached(input_editor))?;
//! session.handle(SessionEvent::OutputSurfaceAttached(output_editor))?;
//!
//! // Every relevant edit regenerates synchronously
//! session.handle(SessionEvent::ContentChanged {
//!     text: spec_text.to_string(),
//! })?;
//! let generated = session.outputs().active();
//! ```

pub mod bootstrap;
pub mod catalog;
pub mod errors;
pub mod events;
pub mod machine;
pub mod options;
pub mod roles;
pub mod surface;
pub mod tabs;

pub use bootstrap::{SessionBootstrap, TabSeed};
pub use catalog::{spawn_catalog_fetch, CatalogTask, PresetLoader};
pub use errors::SessionError;
pub use events::SessionEvent;
pub use machine::{FileForm, FormTarget, Mode, Session, SessionState};
pub use options::OptionsManager;
pub use roles::{Role, RolePredicates, RoleResolver, RoleSelection, ALL_ROLES};
pub use surface::{EditorSurface, LayoutDims};
pub use tabs::{FileTab, TabError, TabList, TabPatch};

// Re-export pipeline types session callers always need
pub use apiforge_pipeline::{GenerateOptions, Outcome, OutputArtifact, Pipeline, PresetCatalog};
