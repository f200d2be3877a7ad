//! Editing an existing student profile with the same draft rules the
//! wizard uses.

use tracing::warn;

use super::draft::{BasicInfo, ProfileDraft, TagList};
use super::model::{Availability, Choice, InteractionMode, LearningStyle, StudentProfile};
use crate::error::{FieldIssue, ValidationError};
use crate::onboarding::state::WizardStep;

/// An edit session over one student's profile.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    id: String,
    photo: String,
    draft: ProfileDraft,
}

impl ProfileEditor {
    /// Start editing `profile`. Option labels that are not in the fixed
    /// lists are dropped.
    pub fn load(profile: &StudentProfile) -> Self {
        let draft = ProfileDraft {
            basic: BasicInfo {
                name: profile.name.clone(),
                email: String::new(),
                course: profile.course.clone(),
                campus: String::new(),
                year: Some(profile.year),
                bio: profile.bio.clone(),
            },
            skills_teach: profile.skills_teach.iter().collect::<TagList>(),
            skills_learn: profile.skills_learn.iter().collect::<TagList>(),
            subjects: profile.subjects.iter().collect::<TagList>(),
            learning_style: parse_labels::<LearningStyle>(&profile.id, &profile.learning_style),
            interaction_mode: parse_labels::<InteractionMode>(&profile.id, &profile.interaction_mode),
            availability: parse_labels::<Availability>(&profile.id, &profile.availability),
        };
        Self {
            id: profile.id.clone(),
            photo: profile.photo.clone(),
            draft,
        }
    }

    /// Replace the whole draft, e.g. with a form submitted in one piece.
    pub fn with_draft(mut self, draft: ProfileDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    /// Validate every step and build the updated profile.
    pub fn save(&self) -> Result<StudentProfile, ValidationError> {
        self.draft.validate_all()?;
        let basic = &self.draft.basic;
        let year = basic.year.ok_or_else(|| ValidationError {
            step: WizardStep::BasicInfo,
            issues: vec![FieldIssue::required("year")],
        })?;

        Ok(StudentProfile {
            id: self.id.clone(),
            name: basic.name.trim().to_string(),
            course: basic.course.trim().to_string(),
            year,
            bio: basic.bio.trim().to_string(),
            photo: self.photo.clone(),
            skills_teach: self.draft.skills_teach.values(),
            skills_learn: self.draft.skills_learn.values(),
            subjects: self.draft.subjects.values(),
            learning_style: labels(&self.draft.learning_style),
            interaction_mode: labels(&self.draft.interaction_mode),
            availability: labels(&self.draft.availability),
        })
    }
}

fn parse_labels<T: Choice>(profile_id: &str, raw: &[String]) -> Vec<T> {
    let mut out = Vec::new();
    for label in raw {
        match T::from_label(label) {
            Some(choice) if !out.contains(&choice) => out.push(choice),
            Some(_) => {}
            None => warn!(profile_id, label = %label, "Dropping unknown option label"),
        }
    }
    out
}

fn labels<T: Choice>(choices: &[T]) -> Vec<String> {
    choices.iter().map(|c| c.label().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::draft::TagField;

    fn you() -> StudentProfile {
        StudentProfile {
            id: "current".into(),
            name: "You".into(),
            course: "Computer Science".into(),
            year: 2,
            bio: "Passionate learner".into(),
            photo: "https://example.test/you.svg".into(),
            skills_teach: vec!["JavaScript".into(), "HTML/CSS".into()],
            skills_learn: vec!["DevOps".into()],
            subjects: vec!["Databases".into()],
            learning_style: vec!["Visual".into(), "Hands-on".into()],
            interaction_mode: vec!["Online".into()],
            availability: vec!["Weekends".into()],
        }
    }

    #[test]
    fn load_then_save_is_lossless() {
        let profile = you();
        let saved = ProfileEditor::load(&profile).save().unwrap();
        assert_eq!(saved, profile);
    }

    #[test]
    fn edits_flow_through_save() {
        let mut editor = ProfileEditor::load(&you());
        let draft = editor.draft_mut();
        let first = draft.skills_teach.iter().next().unwrap().id;
        draft.remove_tag(TagField::SkillsTeach, first);
        draft.add_tag(TagField::SkillsTeach, "Rust");
        draft.toggle_interaction_mode(InteractionMode::Offline);
        draft.basic.year = Some(3);

        let saved = editor.save().unwrap();
        assert_eq!(saved.skills_teach, vec!["HTML/CSS", "Rust"]);
        assert_eq!(saved.interaction_mode, vec!["Online", "Offline"]);
        assert_eq!(saved.year, 3);
        assert_eq!(saved.photo, "https://example.test/you.svg");
    }

    #[test]
    fn save_rejects_incomplete_profile() {
        let mut editor = ProfileEditor::load(&you());
        editor.draft_mut().availability.clear();
        let err = editor.save().unwrap_err();
        assert_eq!(err.step, WizardStep::Preferences);
    }

    #[test]
    fn unknown_and_repeated_labels_are_dropped() {
        let mut profile = you();
        profile.learning_style = vec!["Visual".into(), "Musical".into(), "Visual".into()];
        let editor = ProfileEditor::load(&profile);
        assert_eq!(editor.draft().learning_style, vec![LearningStyle::Visual]);
    }

    #[test]
    fn with_draft_keeps_identity() {
        let mut replacement = ProfileEditor::load(&you()).draft().clone();
        replacement.basic.name = "Renamed".into();
        let saved = ProfileEditor::load(&you()).with_draft(replacement).save().unwrap();
        assert_eq!(saved.id, "current");
        assert_eq!(saved.name, "Renamed");
    }
}
