//! # Session State Machine
//!
//! Hierarchical controller for one playground session.
//!
//! ```text
//! Loading ──(both surfaces attached)──▶ Ready
//!
//! Ready
//! ├── Playing                 edits, tab selection, presets, add/edit/remove
//! ├── EditingOptions          draft-only edits; save commits, close discards
//! ├── EditingEditorSettings   placeholder panel, close only
//! └── EditingFile             FileForm until submit or close
//! ```
//!
//! Run-to-completion: one event is processed at a time, and every state
//! mutation plus the regeneration it triggers finishes before the next
//! event. Transitions are total — each declared event either acts or is a
//! logged no-op; the only silent drop is `select` on a nonexistent tab.
//!
//! Root-level events (`Resize`, `CatalogLoaded`) are accepted in every
//! state, including Loading.

use apiforge_pipeline::{GenerateRequest, Outcome, Pipeline, PresetCatalog};
use tracing::debug;

use crate::bootstrap::SessionBootstrap;
use crate::errors::SessionError;
use crate::events::SessionEvent;
use crate::options::OptionsManager;
use crate::roles::{RoleResolver, RoleSelection};
use crate::surface::{EditorSurface, LayoutDims};
use crate::tabs::{FileTab, TabList, TabPatch};

/// Transient form for a tab being created or edited; exists only while a
/// file editing mode is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileForm {
    pub target: FormTarget,
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    /// Appending a new tab at this index
    Create { index: usize },
    /// Replacing the tab at this index
    Edit { index: usize },
}

/// Substates of Ready
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Playing,
    EditingOptions,
    EditingEditorSettings,
    EditingFile(FileForm),
}

/// Top-level session states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for both editor surfaces to attach
    Loading,
    Ready { mode: Mode },
}

/// One playground session: the single-actor owner of all core state
pub struct Session {
    tabs: TabList,
    outputs: TabList,
    roles: RoleResolver,
    options: OptionsManager,
    catalog: PresetCatalog,
    pipeline: Pipeline,
    state: SessionState,
    output_name: String,
    input_surface: Option<Box<dyn EditorSurface>>,
    output_surface: Option<Box<dyn EditorSurface>>,
}

impl Session {
    /// Seed a session: three input tabs, one empty output tab, role
    /// pointers resolved from the seeds.
    pub fn new(bootstrap: SessionBootstrap, pipeline: Pipeline) -> Self {
        let tabs = TabList::from_tabs(vec![
            FileTab::new(bootstrap.document.name, bootstrap.document.content),
            FileTab::new(bootstrap.template.name, bootstrap.template.content),
            FileTab::new(
                bootstrap.formatter_config.name,
                bootstrap.formatter_config.content,
            ),
        ]);
        let outputs = TabList::from_tabs(vec![FileTab::new(bootstrap.output_name.clone(), "")]);

        let mut roles = RoleResolver::standard();
        roles.resolve_all(&tabs);

        Self {
            tabs,
            outputs,
            roles,
            options: OptionsManager::new(bootstrap.default_options),
            catalog: PresetCatalog::new(),
            pipeline,
            state: SessionState::Loading,
            output_name: bootstrap.output_name,
            input_surface: None,
            output_surface: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tabs(&self) -> &TabList {
        &self.tabs
    }

    pub fn outputs(&self) -> &TabList {
        &self.outputs
    }

    pub fn role_selection(&self) -> &RoleSelection {
        self.roles.selection()
    }

    pub fn options(&self) -> &OptionsManager {
        &self.options
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Process one event to completion
    pub fn handle(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        // Root-level events are accepted in every state
        match event {
            SessionEvent::Resize(dims) => {
                self.resize(dims);
                return Ok(());
            }
            SessionEvent::CatalogLoaded(catalog) => {
                self.catalog.merge(catalog);
                return Ok(());
            }
            _ => {}
        }

        match &self.state {
            SessionState::Loading => self.handle_loading(event),
            SessionState::Ready {
                mode: Mode::Playing,
            } => self.handle_playing(event),
            SessionState::Ready {
                mode: Mode::EditingOptions,
            } => self.handle_editing_options(event),
            SessionState::Ready {
                mode: Mode::EditingEditorSettings,
            } => self.handle_editing_editor_settings(event),
            SessionState::Ready {
                mode: Mode::EditingFile(_),
            } => self.handle_editing_file(event),
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    fn handle_loading(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::InputSurfaceAttached(surface) => {
                self.input_surface = Some(surface);
                self.try_enter_ready();
                Ok(())
            }
            SessionEvent::OutputSurfaceAttached(surface) => {
                self.output_surface = Some(surface);
                self.try_enter_ready();
                Ok(())
            }
            other => {
                debug!(event = other.name(), "ignored while loading");
                Ok(())
            }
        }
    }

    /// A single attachment may complete the pair if the other surface
    /// already arrived. Entering Ready pushes the active input tab into
    /// its surface and runs the first regeneration.
    fn try_enter_ready(&mut self) {
        if self.input_surface.is_some() && self.output_surface.is_some() {
            self.state = SessionState::Ready {
                mode: Mode::Playing,
            };
            self.push_active_input();
            self.regenerate();
        }
    }

    // ------------------------------------------------------------------
    // Playing
    // ------------------------------------------------------------------

    fn handle_playing(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::ContentChanged { text } => {
                self.apply_content_edit(text);
                Ok(())
            }
            SessionEvent::SelectTab { name } => {
                self.select_input_tab(&name);
                Ok(())
            }
            SessionEvent::SelectOutputTab { name } => {
                self.outputs.select(&name);
                self.push_active_output();
                Ok(())
            }
            SessionEvent::ChoosePreset { preset } => {
                self.choose_preset(preset);
                Ok(())
            }
            SessionEvent::OpenOptions => {
                self.set_mode(Mode::EditingOptions);
                Ok(())
            }
            SessionEvent::OpenEditorSettings => {
                self.set_mode(Mode::EditingEditorSettings);
                Ok(())
            }
            SessionEvent::AddFile => {
                self.set_mode(Mode::EditingFile(FileForm {
                    target: FormTarget::Create {
                        index: self.tabs.len(),
                    },
                    name: String::new(),
                    content: String::new(),
                }));
                Ok(())
            }
            SessionEvent::EditFile { index } => {
                self.open_edit_form(index);
                Ok(())
            }
            SessionEvent::RemoveFile { index } => {
                self.remove_file(index);
                Ok(())
            }
            other => {
                debug!(event = other.name(), "no-op in playing");
                Ok(())
            }
        }
    }

    fn apply_content_edit(&mut self, text: String) {
        let index = self.tabs.active_index();
        let Some(was_empty) = self.tabs.get(index).map(|t| t.content.is_empty()) else {
            return;
        };
        if self.tabs.set_content(index, text).is_err() {
            return;
        }

        // The "first keystroke" case: content going empty → non-empty
        // lets the active tab claim any role its name matches.
        if was_empty {
            let claimed = self
                .tabs
                .get(index)
                .filter(|tab| !tab.content.is_empty())
                .cloned();
            if let Some(tab) = claimed {
                self.roles.on_first_keystroke(&tab);
            }
        }

        self.regenerate();
    }

    fn select_input_tab(&mut self, name: &str) {
        // Selecting a nonexistent tab is the documented silent no-op
        let Some(tab) = self.tabs.find(name).cloned() else {
            debug!(name, "select on nonexistent tab");
            return;
        };
        self.tabs.select(name);
        self.roles.on_selected(&tab);
        self.push_active_input();
        self.regenerate();
    }

    fn choose_preset(&mut self, preset: String) {
        let Some(template) = self.roles.selection().template().map(str::to_string) else {
            debug!("preset chosen with no template tab assigned");
            return;
        };
        let Some(index) = self.tabs.position(&template) else {
            return;
        };
        let _ = self.tabs.set_preset(index, Some(preset));
        self.regenerate();
    }

    fn open_edit_form(&mut self, index: usize) {
        let Some(tab) = self.tabs.get(index) else {
            debug!(index, "edit on nonexistent tab");
            return;
        };
        let form = FileForm {
            target: FormTarget::Edit { index },
            name: tab.name.clone(),
            content: tab.content.clone(),
        };
        self.set_mode(Mode::EditingFile(form));
    }

    fn remove_file(&mut self, index: usize) {
        let removed = match self.tabs.remove(index) {
            Ok(tab) => tab,
            Err(err) => {
                debug!(index, "remove failed: {err}");
                return;
            }
        };
        self.roles.on_removed(&removed.name, &self.tabs);
        self.push_active_input();
        self.regenerate();
    }

    // ------------------------------------------------------------------
    // EditingOptions
    // ------------------------------------------------------------------

    fn handle_editing_options(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::UpdateDraftOptions { options } => {
                self.options.update_draft(options);
                Ok(())
            }
            SessionEvent::ResetOptions => {
                self.options.reset_draft();
                Ok(())
            }
            SessionEvent::SaveOptions => {
                let committed = self.options.draft().clone();
                self.options.commit(committed);
                self.set_mode(Mode::Playing);
                self.regenerate();
                Ok(())
            }
            SessionEvent::CloseOptions => {
                self.options.discard_draft();
                self.set_mode(Mode::Playing);
                Ok(())
            }
            other => {
                debug!(event = other.name(), "no-op while editing options");
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // EditingEditorSettings
    // ------------------------------------------------------------------

    fn handle_editing_editor_settings(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::CloseEditorSettings => {
                self.set_mode(Mode::Playing);
                Ok(())
            }
            other => {
                debug!(event = other.name(), "no-op while editing editor settings");
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // EditingFile
    // ------------------------------------------------------------------

    fn handle_editing_file(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::UpdateFileForm { name, content } => {
                if let SessionState::Ready {
                    mode: Mode::EditingFile(form),
                } = &mut self.state
                {
                    form.name = name;
                    form.content = content;
                }
                Ok(())
            }
            SessionEvent::SubmitFile => self.submit_file(),
            SessionEvent::CloseFileForm => {
                self.set_mode(Mode::Playing);
                Ok(())
            }
            other => {
                debug!(event = other.name(), "no-op while editing file");
                Ok(())
            }
        }
    }

    /// Commit the form: append for create, replace-at-index for edit. A
    /// duplicate name is rejected before any registry mutation and the
    /// form stays open.
    fn submit_file(&mut self) -> Result<(), SessionError> {
        let form = match &self.state {
            SessionState::Ready {
                mode: Mode::EditingFile(form),
            } => form.clone(),
            _ => return Ok(()),
        };

        match form.target {
            FormTarget::Create { .. } => {
                self.tabs
                    .add(FileTab::new(form.name.clone(), form.content.clone()))?;
            }
            FormTarget::Edit { index } => {
                self.tabs.update(
                    index,
                    TabPatch {
                        name: Some(form.name.clone()),
                        content: Some(form.content.clone()),
                    },
                )?;
            }
        }

        self.tabs.select(&form.name);
        // A rename can leave a role pointing at a name that no longer
        // exists; repair before the submitted tab claims its roles.
        self.roles.resolve_all(&self.tabs);
        if let Some(tab) = self.tabs.find(&form.name).cloned() {
            self.roles.on_submitted(&tab, true);
        }

        self.set_mode(Mode::Playing);
        self.push_active_input();
        self.regenerate();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shared
    // ------------------------------------------------------------------

    fn set_mode(&mut self, mode: Mode) {
        debug_assert!(
            matches!(self.state, SessionState::Ready { .. }),
            "mode change outside Ready"
        );
        self.state = SessionState::Ready { mode };
    }

    fn resize(&mut self, dims: LayoutDims) {
        if let Some(surface) = &mut self.output_surface {
            surface.layout(dims);
        }
    }

    fn push_active_input(&mut self) {
        let Some(content) = self.tabs.active().map(|t| t.content.clone()) else {
            return;
        };
        if let Some(surface) = &mut self.input_surface {
            surface.set_value(&content);
        }
    }

    fn push_active_output(&mut self) {
        let Some(content) = self.outputs.active().map(|t| t.content.clone()) else {
            return;
        };
        if let Some(surface) = &mut self.output_surface {
            surface.set_value(&content);
        }
    }

    /// Re-run generation from the current role assignments and committed
    /// options. Fresh artifacts replace the output list wholesale and the
    /// first one becomes active; `Unchanged` keeps the last good output.
    fn regenerate(&mut self) {
        let selection = self.roles.selection();
        let document = selection
            .document()
            .and_then(|name| self.tabs.find(name))
            .map(|tab| tab.content.as_str())
            .unwrap_or("");
        let (template_name, template_content, template_preset) = match selection
            .template()
            .and_then(|name| self.tabs.find(name))
        {
            Some(tab) => (tab.name.as_str(), tab.content.as_str(), tab.preset.as_deref()),
            None => ("", "", None),
        };
        let formatter_config = selection
            .formatter_config()
            .and_then(|name| self.tabs.find(name))
            .map(|tab| tab.content.as_str())
            .unwrap_or("");

        let request = GenerateRequest {
            document,
            template_name,
            template_content,
            template_preset,
            formatter_config,
            options: self.options.committed(),
            catalog: &self.catalog,
            output_name: &self.output_name,
        };

        match self.pipeline.generate(&request) {
            Outcome::Unchanged => {
                debug!("generation unchanged, keeping previous output");
            }
            Outcome::Artifacts(artifacts) => {
                let tabs = artifacts.into_iter().map(FileTab::from).collect();
                self.outputs.replace_all(tabs);
                self.push_active_output();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::TabSeed;
    use apiforge_pipeline::{
        CompiledTemplate, ContextBuilder, ContextError, FormatError, Formatter, GenerateOptions,
        RenderInput, TemplateContext, TemplateEngine, TemplateError,
    };
    use serde_json::Value;

    struct EchoBuilder;

    impl ContextBuilder for EchoBuilder {
        fn build_context(
            &self,
            _document: &Value,
            _options: &GenerateOptions,
        ) -> Result<TemplateContext, ContextError> {
            Ok(TemplateContext::new())
        }
    }

    struct EchoEngine;

    struct EchoTemplate {
        source: String,
    }

    impl TemplateEngine for EchoEngine {
        fn compile(&self, source: &str) -> Result<Box<dyn CompiledTemplate>, TemplateError> {
            Ok(Box::new(EchoTemplate {
                source: source.to_string(),
            }))
        }
    }

    impl CompiledTemplate for EchoTemplate {
        fn render(&self, _input: &RenderInput<'_>) -> Result<String, TemplateError> {
            Ok(self.source.clone())
        }
    }

    struct NoopFormatter;

    impl Formatter for NoopFormatter {
        fn format(&self, text: &str, _config: &Value) -> Result<String, FormatError> {
            Ok(text.to_string())
        }
    }

    struct NullSurface;

    impl EditorSurface for NullSurface {
        fn set_value(&mut self, _text: &str) {}

        fn layout_info(&self) -> LayoutDims {
            LayoutDims {
                width: 0,
                height: 0,
            }
        }

        fn layout(&mut self, _dims: LayoutDims) {}
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(
            Box::new(EchoBuilder),
            Box::new(EchoEngine),
            Box::new(NoopFormatter),
        )
    }

    fn bootstrap() -> SessionBootstrap {
        SessionBootstrap {
            document: TabSeed::new("swagger.json", r#"{"openapi": "3.0.0"}"#),
            template: TabSeed::new("client.hbs", "template body"),
            formatter_config: TabSeed::new(".prettierrc.json", "{}"),
            output_name: "api.ts".to_string(),
            default_options: GenerateOptions::new(),
        }
    }

    fn ready_session() -> Session {
        let mut session = Session::new(bootstrap(), pipeline());
        session
            .handle(SessionEvent::InputSurfaceAttached(Box::new(NullSurface)))
            .unwrap();
        session
            .handle(SessionEvent::OutputSurfaceAttached(Box::new(NullSurface)))
            .unwrap();
        session
    }

    #[test]
    fn test_stays_loading_until_both_surfaces_attach() {
        let mut session = Session::new(bootstrap(), pipeline());
        assert_eq!(session.state(), &SessionState::Loading);

        session
            .handle(SessionEvent::InputSurfaceAttached(Box::new(NullSurface)))
            .unwrap();
        assert_eq!(session.state(), &SessionState::Loading);

        session
            .handle(SessionEvent::OutputSurfaceAttached(Box::new(NullSurface)))
            .unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Ready {
                mode: Mode::Playing
            }
        );
    }

    #[test]
    fn test_entering_ready_runs_first_generation() {
        let session = ready_session();
        let output = session.outputs().active().unwrap();
        assert_eq!(output.name, "api.ts");
        assert_eq!(output.content, "template body");
    }

    #[test]
    fn test_bootstrap_resolves_all_roles() {
        let session = Session::new(bootstrap(), pipeline());
        assert_eq!(session.role_selection().document(), Some("swagger.json"));
        assert_eq!(session.role_selection().template(), Some("client.hbs"));
        assert_eq!(
            session.role_selection().formatter_config(),
            Some(".prettierrc.json")
        );
    }

    #[test]
    fn test_options_mode_roundtrip() {
        let mut session = ready_session();
        session.handle(SessionEvent::OpenOptions).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Ready {
                mode: Mode::EditingOptions
            }
        );

        session.handle(SessionEvent::CloseOptions).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Ready {
                mode: Mode::Playing
            }
        );
    }

    #[test]
    fn test_editor_settings_mode_roundtrip() {
        let mut session = ready_session();
        session.handle(SessionEvent::OpenEditorSettings).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Ready {
                mode: Mode::EditingEditorSettings
            }
        );

        // Opening options is not an editor-settings event: documented no-op
        session.handle(SessionEvent::OpenOptions).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Ready {
                mode: Mode::EditingEditorSettings
            }
        );

        session.handle(SessionEvent::CloseEditorSettings).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Ready {
                mode: Mode::Playing
            }
        );
    }

    #[test]
    fn test_add_file_form_prefills_next_index() {
        let mut session = ready_session();
        session.handle(SessionEvent::AddFile).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::Ready {
                mode: Mode::EditingFile(FileForm {
                    target: FormTarget::Create { index: 3 },
                    name: String::new(),
                    content: String::new(),
                })
            }
        );
    }

    #[test]
    fn test_close_file_form_discards_draft() {
        let mut session = ready_session();
        session.handle(SessionEvent::AddFile).unwrap();
        session
            .handle(SessionEvent::UpdateFileForm {
                name: "new.json".to_string(),
                content: "{}".to_string(),
            })
            .unwrap();
        session.handle(SessionEvent::CloseFileForm).unwrap();

        assert_eq!(session.tabs().len(), 3);
        assert!(session.tabs().find("new.json").is_none());
    }

    #[test]
    fn test_duplicate_create_rejected_and_form_stays_open() {
        let mut session = ready_session();
        session.handle(SessionEvent::AddFile).unwrap();
        session
            .handle(SessionEvent::UpdateFileForm {
                name: "swagger.json".to_string(),
                content: "{}".to_string(),
            })
            .unwrap();

        let result = session.handle(SessionEvent::SubmitFile);
        assert!(result.is_err());
        assert_eq!(session.tabs().len(), 3);
        assert!(matches!(
            session.state(),
            SessionState::Ready {
                mode: Mode::EditingFile(_)
            }
        ));
    }

    #[test]
    fn test_unknown_event_is_noop_in_playing() {
        let mut session = ready_session();
        let before = session.state().clone();
        session.handle(SessionEvent::SaveOptions).unwrap();
        session.handle(SessionEvent::SubmitFile).unwrap();
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_catalog_merges_in_any_state() {
        let mut session = Session::new(bootstrap(), pipeline());
        let mut catalog = PresetCatalog::new();
        catalog.insert("fetch", "text");

        session
            .handle(SessionEvent::CatalogLoaded(catalog.clone()))
            .unwrap();
        assert!(session.catalog().contains("fetch"));

        // Still applied while a modal mode is active
        let mut session = ready_session();
        session.handle(SessionEvent::OpenOptions).unwrap();
        session.handle(SessionEvent::CatalogLoaded(catalog)).unwrap();
        assert!(session.catalog().contains("fetch"));
    }

    #[test]
    fn test_resize_accepted_while_loading() {
        let mut session = Session::new(bootstrap(), pipeline());
        session
            .handle(SessionEvent::Resize(LayoutDims {
                width: 800,
                height: 600,
            }))
            .unwrap();
        assert_eq!(session.state(), &SessionState::Loading);
    }

    #[test]
    fn test_select_nonexistent_tab_is_silent_noop() {
        let mut session = ready_session();
        let active_before = session.tabs().active_index();
        session
            .handle(SessionEvent::SelectTab {
                name: "missing.json".to_string(),
            })
            .unwrap();
        assert_eq!(session.tabs().active_index(), active_before);
    }
}
