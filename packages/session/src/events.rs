//! # Session Events
//!
//! Everything the session reacts to arrives through one enum and one
//! entry point ([`Session::handle`](crate::machine::Session::handle)).
//! Events are processed to completion, one at a time.

use apiforge_pipeline::{GenerateOptions, PresetCatalog};

use crate::surface::{EditorSurface, LayoutDims};

pub enum SessionEvent {
    /// Input-side editor surface finished loading
    InputSurfaceAttached(Box<dyn EditorSurface>),
    /// Output-side editor surface finished loading
    OutputSurfaceAttached(Box<dyn EditorSurface>),

    /// Active input tab content changed in the editor
    ContentChanged { text: String },
    /// Input tab clicked
    SelectTab { name: String },
    /// Output tab clicked
    SelectOutputTab { name: String },
    /// Preset template chosen for the current template tab
    ChoosePreset { preset: String },

    /// Open the options form
    OpenOptions,
    /// Overwrite the draft option set
    UpdateDraftOptions { options: GenerateOptions },
    /// Restore default options in the draft
    ResetOptions,
    /// Commit the draft and regenerate
    SaveOptions,
    /// Discard the draft delta
    CloseOptions,

    /// Open the editor-settings panel (placeholder, no committable effect)
    OpenEditorSettings,
    CloseEditorSettings,

    /// Open an empty file form for a new tab
    AddFile,
    /// Open the file form pre-filled from an existing tab
    EditFile { index: usize },
    /// Overwrite the file form fields
    UpdateFileForm { name: String, content: String },
    /// Commit the file form into the tab list
    SubmitFile,
    /// Discard the file form
    CloseFileForm,
    /// Remove an input tab
    RemoveFile { index: usize },

    /// Background preset-catalog fetch completed
    CatalogLoaded(PresetCatalog),
    /// Window resized; forwarded to the output surface in every state
    Resize(LayoutDims),
}

impl SessionEvent {
    /// Event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::InputSurfaceAttached(_) => "input-surface-attached",
            SessionEvent::OutputSurfaceAttached(_) => "output-surface-attached",
            SessionEvent::ContentChanged { .. } => "content-changed",
            SessionEvent::SelectTab { .. } => "select-tab",
            SessionEvent::SelectOutputTab { .. } => "select-output-tab",
            SessionEvent::ChoosePreset { .. } => "choose-preset",
            SessionEvent::OpenOptions => "open-options",
            SessionEvent::UpdateDraftOptions { .. } => "update-draft-options",
            SessionEvent::ResetOptions => "reset-options",
            SessionEvent::SaveOptions => "save-options",
            SessionEvent::CloseOptions => "close-options",
            SessionEvent::OpenEditorSettings => "open-editor-settings",
            SessionEvent::CloseEditorSettings => "close-editor-settings",
            SessionEvent::AddFile => "add-file",
            SessionEvent::EditFile { .. } => "edit-file",
            SessionEvent::UpdateFileForm { .. } => "update-file-form",
            SessionEvent::SubmitFile => "submit-file",
            SessionEvent::CloseFileForm => "close-file-form",
            SessionEvent::RemoveFile { .. } => "remove-file",
            SessionEvent::CatalogLoaded(_) => "catalog-loaded",
            SessionEvent::Resize(_) => "resize",
        }
    }
}
