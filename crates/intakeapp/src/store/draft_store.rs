use super::backend::DraftStorage;
use crate::error::Result;
use crate::model::{Draft, DraftSnapshot, FieldPath, Step};
use crate::validation::FieldErrors;

/// Owner of the in-progress draft and the wizard's step state.
///
/// Every mutation is written through to the [`DraftStorage`] slot. When the slot
/// cannot be read or written, the store logs a warning and keeps working purely
/// in memory for the rest of the session: losing save-progress is degraded
/// service, not a reason to stop the wizard.
pub struct DraftStore<S: DraftStorage> {
    storage: S,
    draft: Draft,
    step: Step,
    errors: FieldErrors,
    degraded: bool,
}

impl<S: DraftStorage> DraftStore<S> {
    /// Resume from the slot, or start from the empty draft on step 0.
    pub fn open(storage: S) -> Self {
        let (snapshot, degraded) = match storage.load_draft() {
            Ok(Some(snapshot)) => {
                tracing::debug!(step = ?snapshot.step, "resumed saved draft");
                (snapshot, false)
            }
            Ok(None) => (DraftSnapshot::default(), false),
            Err(e) => {
                tracing::warn!(error = %e, "could not load saved draft, continuing in memory");
                (DraftSnapshot::default(), true)
            }
        };

        Self {
            storage,
            draft: snapshot.draft,
            step: snapshot.step,
            errors: FieldErrors::new(),
            degraded,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The report from the last validation call.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// True once persistence has failed; progress is no longer being saved.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace one leaf and save. Invalid values leave the draft untouched.
    pub fn update(&mut self, path: &FieldPath, value: &str) -> Result<()> {
        self.draft.set(path, value)?;
        self.persist();
        Ok(())
    }

    pub(crate) fn set_step(&mut self, step: Step) {
        if self.step != step {
            self.step = step;
            self.persist();
        }
    }

    pub(crate) fn publish_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Back to the empty draft on step 0, and drop the saved slot.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.step = Step::FIRST;
        self.errors = FieldErrors::new();
        if self.degraded {
            return;
        }
        if let Err(e) = self.storage.delete_draft() {
            self.degrade(&e);
        }
    }

    fn persist(&mut self) {
        if self.degraded {
            return;
        }
        let snapshot = DraftSnapshot {
            draft: self.draft.clone(),
            step: self.step,
        };
        if let Err(e) = self.storage.save_draft(&snapshot) {
            self.degrade(&e);
        }
    }

    fn degrade(&mut self, error: &crate::error::IntakeError) {
        tracing::warn!(error = %error, "draft persistence failed, continuing in memory");
        self.degraded = true;
    }
}
