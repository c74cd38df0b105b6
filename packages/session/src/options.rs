//! # Options Manager
//!
//! The classic edit-buffer pair: a committed option set drives generation
//! while an independent draft absorbs edits in the options form until it
//! is saved or discarded. Two named instances with explicit commit and
//! discard, never copy-on-write.

use apiforge_pipeline::GenerateOptions;

pub struct OptionsManager {
    defaults: GenerateOptions,
    committed: GenerateOptions,
    draft: GenerateOptions,
    form_generation: u64,
}

impl OptionsManager {
    pub fn new(defaults: GenerateOptions) -> Self {
        Self {
            committed: defaults.clone(),
            draft: defaults.clone(),
            defaults,
            form_generation: 0,
        }
    }

    /// The option set generation runs with
    pub fn committed(&self) -> &GenerateOptions {
        &self.committed
    }

    /// The option set the form is editing
    pub fn draft(&self) -> &GenerateOptions {
        &self.draft
    }

    /// Remount counter for stateful options forms. Bumped on reset so the
    /// form rebuilds from the draft; no effect on generation output.
    pub fn form_generation(&self) -> u64 {
        self.form_generation
    }

    /// Overwrite the draft wholesale. No validation here — the form owns
    /// what the keys mean.
    pub fn update_draft(&mut self, options: GenerateOptions) {
        self.draft = options;
    }

    /// Restore defaults in the draft and force a form remount
    pub fn reset_draft(&mut self) {
        self.draft = self.defaults.clone();
        self.form_generation += 1;
    }

    /// Promote an option set: both copies are synchronized after a save
    pub fn commit(&mut self, options: GenerateOptions) {
        self.committed = options.clone();
        self.draft = options;
    }

    /// Drop the draft delta, falling back to the committed set
    pub fn discard_draft(&mut self) {
        self.draft = self.committed.clone();
    }
}
