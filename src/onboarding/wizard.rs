//! Profile wizard — a draft plus the step it is on.
//!
//! Every transition except `submit` is a synchronous in-memory edit.
//! Step guards run on `advance`, so a draft can only reach review once each
//! earlier page is complete.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::state::{STEP_COUNT, WizardStep};
use crate::error::WizardError;
use crate::profile::{
    Availability, BasicInfo, ChoiceField, InteractionMode, LearningStyle, ProfileDraft, SkillKind,
    StoredProfile, TagField, TagId,
};
use crate::store::ProfileStore;

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    draft: ProfileDraft,
}

/// Snapshot of a wizard for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub step_number: u8,
    pub total_steps: u8,
    pub can_submit: bool,
    pub draft: ProfileDraft,
}

impl Wizard {
    /// Start at the first step with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            step: self.step,
            step_number: self.step.number(),
            total_steps: STEP_COUNT,
            can_submit: self.can_submit(),
            draft: self.draft.clone(),
        }
    }

    /// Whether `submit` would pass its own checks (the store may still fail).
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Review && self.draft.validate_all().is_ok()
    }

    fn editable(&mut self) -> Result<&mut ProfileDraft, WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(&mut self.draft)
    }

    // ── Draft edits ─────────────────────────────────────────────────

    pub fn set_basic_info(&mut self, info: BasicInfo) -> Result<(), WizardError> {
        self.editable()?.basic = info;
        Ok(())
    }

    pub fn add_tag(&mut self, field: TagField, value: &str) -> Result<Option<TagId>, WizardError> {
        Ok(self.editable()?.add_tag(field, value))
    }

    pub fn remove_tag(&mut self, field: TagField, id: TagId) -> Result<bool, WizardError> {
        Ok(self.editable()?.remove_tag(field, id))
    }

    pub fn add_skill(&mut self, kind: SkillKind, value: &str) -> Result<Option<TagId>, WizardError> {
        self.add_tag(kind.into(), value)
    }

    pub fn remove_skill(&mut self, kind: SkillKind, id: TagId) -> Result<bool, WizardError> {
        self.remove_tag(kind.into(), id)
    }

    pub fn remove_skill_at(&mut self, kind: SkillKind, index: usize) -> Result<bool, WizardError> {
        Ok(self.editable()?.remove_tag_at(kind.into(), index))
    }

    pub fn add_subject(&mut self, value: &str) -> Result<Option<TagId>, WizardError> {
        self.add_tag(TagField::Subjects, value)
    }

    pub fn remove_subject(&mut self, id: TagId) -> Result<bool, WizardError> {
        self.remove_tag(TagField::Subjects, id)
    }

    pub fn remove_subject_at(&mut self, index: usize) -> Result<bool, WizardError> {
        Ok(self.editable()?.remove_tag_at(TagField::Subjects, index))
    }

    pub fn toggle_learning_style(&mut self, style: LearningStyle) -> Result<bool, WizardError> {
        Ok(self.editable()?.toggle_learning_style(style))
    }

    pub fn toggle_interaction_mode(&mut self, mode: InteractionMode) -> Result<bool, WizardError> {
        Ok(self.editable()?.toggle_interaction_mode(mode))
    }

    pub fn toggle_availability(&mut self, slot: Availability) -> Result<bool, WizardError> {
        Ok(self.editable()?.toggle_availability(slot))
    }

    /// Toggle an option given by its label.
    pub fn toggle_choice(&mut self, field: ChoiceField, label: &str) -> Result<bool, WizardError> {
        Ok(self.editable()?.toggle_choice(field, label)?)
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Move to the next page if the current one is complete.
    ///
    /// At review this is a no-op that still re-checks the draft.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::AlreadySubmitted);
        }
        self.draft.validate_step(self.step)?;
        if let Some(next) = self.step.next() {
            debug_assert!(self.step.can_transition_to(next));
            debug!(from = %self.step, to = %next, "Wizard advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one page. The draft is kept as is.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::AlreadySubmitted);
        }
        let previous = self.step.previous().ok_or(WizardError::NoPreviousStep)?;
        debug!(from = %self.step, to = %previous, "Wizard went back");
        self.step = previous;
        Ok(previous)
    }

    /// Save the profile.
    ///
    /// On a store failure the wizard stays at review with the draft intact
    /// so the caller can retry.
    pub async fn submit(&mut self, store: &dyn ProfileStore) -> Result<StoredProfile, WizardError> {
        if self.step.is_terminal() {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.step != WizardStep::Review {
            return Err(WizardError::NotAtReview { step: self.step });
        }
        self.draft.validate_all()?;

        let normalized = self.draft.normalize();
        match store.create(&normalized).await {
            Ok(stored) => {
                info!(
                    student_id = %stored.id,
                    interaction_mode = %stored.profile.interaction_mode,
                    learning_style = %stored.profile.learning_style,
                    "Profile created"
                );
                self.step = WizardStep::Submitted;
                Ok(stored)
            }
            Err(e) => {
                warn!(error = %e, "Profile store rejected submit");
                Err(e.into())
            }
        }
    }
}
