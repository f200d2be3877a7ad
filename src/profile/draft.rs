//! In-progress profile and the edits both the wizard and the profile
//! editor apply to it.
//!
//! Tag entries get a stable [`TagId`] when added so removal does not depend
//! on render position.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::model::{
    Availability, Choice, InteractionMode, InteractionModeCode, LearningStyle, LearningStyleCode,
    NormalizedProfile, UnknownChoice,
};
use crate::error::{FieldIssue, ValidationError};
use crate::onboarding::state::WizardStep;

/// Highest study year accepted.
pub const MAX_YEAR: u8 = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Remove `value` if present, otherwise append it. Returns whether the value
/// is selected afterwards.
pub fn toggle_member<T: PartialEq>(set: &mut Vec<T>, value: T) -> bool {
    if let Some(pos) = set.iter().position(|v| *v == value) {
        set.remove(pos);
        false
    } else {
        set.push(value);
        true
    }
}

// ── Tags ────────────────────────────────────────────────────────────

/// Stable identifier of one tag entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(Uuid);

impl TagId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TagId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TagId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: TagId,
    pub value: String,
}

/// Ordered free-text entries (skills, subjects). Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<Tag>);

impl TagList {
    /// Append a trimmed entry. Blank input is ignored.
    pub fn add(&mut self, value: &str) -> Option<TagId> {
        self.push(Tag {
            id: TagId::new(),
            value: value.to_string(),
        })
    }

    fn push(&mut self, tag: Tag) -> Option<TagId> {
        let value = tag.value.trim();
        if value.is_empty() {
            return None;
        }
        let id = tag.id;
        self.0.push(Tag {
            id,
            value: value.to_string(),
        });
        Some(id)
    }

    /// Remove the entry with `id`. Returns false if no entry has it.
    pub fn remove(&mut self, id: TagId) -> bool {
        match self.0.iter().position(|t| t.id == id) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove by position. Out-of-range indexes leave the list unchanged.
    pub fn remove_at(&mut self, index: usize) -> Option<Tag> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    pub fn values(&self) -> Vec<String> {
        self.0.iter().map(|t| t.value.clone()).collect()
    }
}

impl<'de> Deserialize<'de> for TagList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<Tag>::deserialize(deserializer)?;
        let mut list = TagList::default();
        for tag in raw {
            list.push(tag);
        }
        Ok(list)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = TagList::default();
        for value in iter {
            list.add(value.as_ref());
        }
        list
    }
}

/// Which tag list an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagField {
    SkillsTeach,
    SkillsLearn,
    Subjects,
}

impl FromStr for TagField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skills_teach" => Ok(Self::SkillsTeach),
            "skills_learn" => Ok(Self::SkillsLearn),
            "subjects" => Ok(Self::Subjects),
            other => Err(format!("Unknown tag field: {other}")),
        }
    }
}

/// Teach or learn, for the skill operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Teach,
    Learn,
}

impl From<SkillKind> for TagField {
    fn from(kind: SkillKind) -> Self {
        match kind {
            SkillKind::Teach => TagField::SkillsTeach,
            SkillKind::Learn => TagField::SkillsLearn,
        }
    }
}

/// Which multi-select an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceField {
    LearningStyle,
    InteractionMode,
    Availability,
}

// ── Draft ───────────────────────────────────────────────────────────

/// Step-1 identity fields, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    pub course: String,
    pub campus: String,
    pub year: Option<u8>,
    pub bio: String,
}

/// A profile being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    #[serde(flatten)]
    pub basic: BasicInfo,
    pub skills_teach: TagList,
    pub skills_learn: TagList,
    pub subjects: TagList,
    pub learning_style: Vec<LearningStyle>,
    pub interaction_mode: Vec<InteractionMode>,
    pub availability: Vec<Availability>,
}

impl ProfileDraft {
    pub fn tags(&self, field: TagField) -> &TagList {
        match field {
            TagField::SkillsTeach => &self.skills_teach,
            TagField::SkillsLearn => &self.skills_learn,
            TagField::Subjects => &self.subjects,
        }
    }

    fn tags_mut(&mut self, field: TagField) -> &mut TagList {
        match field {
            TagField::SkillsTeach => &mut self.skills_teach,
            TagField::SkillsLearn => &mut self.skills_learn,
            TagField::Subjects => &mut self.subjects,
        }
    }

    pub fn add_tag(&mut self, field: TagField, value: &str) -> Option<TagId> {
        self.tags_mut(field).add(value)
    }

    pub fn remove_tag(&mut self, field: TagField, id: TagId) -> bool {
        self.tags_mut(field).remove(id)
    }

    pub fn remove_tag_at(&mut self, field: TagField, index: usize) -> bool {
        self.tags_mut(field).remove_at(index).is_some()
    }

    pub fn toggle_learning_style(&mut self, style: LearningStyle) -> bool {
        toggle_member(&mut self.learning_style, style)
    }

    pub fn toggle_interaction_mode(&mut self, mode: InteractionMode) -> bool {
        toggle_member(&mut self.interaction_mode, mode)
    }

    pub fn toggle_availability(&mut self, slot: Availability) -> bool {
        toggle_member(&mut self.availability, slot)
    }

    /// Toggle an option given by its label.
    pub fn toggle_choice(&mut self, field: ChoiceField, label: &str) -> Result<bool, UnknownChoice> {
        Ok(match field {
            ChoiceField::LearningStyle => self.toggle_learning_style(label.parse()?),
            ChoiceField::InteractionMode => self.toggle_interaction_mode(label.parse()?),
            ChoiceField::Availability => self.toggle_availability(label.parse()?),
        })
    }

    /// Check the fields a single step requires.
    ///
    /// `Review` and `Submitted` require the whole draft.
    pub fn validate_step(&self, step: WizardStep) -> Result<(), ValidationError> {
        let issues = match step {
            WizardStep::BasicInfo => self.basic_info_issues(),
            WizardStep::Skills => self.skills_issues(),
            WizardStep::Preferences => self.preferences_issues(),
            WizardStep::Review | WizardStep::Submitted => return self.validate_all(),
        };
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { step, issues })
        }
    }

    /// Check every step, reporting the earliest one that fails.
    pub fn validate_all(&self) -> Result<(), ValidationError> {
        self.validate_step(WizardStep::BasicInfo)?;
        self.validate_step(WizardStep::Skills)?;
        self.validate_step(WizardStep::Preferences)
    }

    fn basic_info_issues(&self) -> Vec<FieldIssue> {
        let b = &self.basic;
        let mut issues = Vec::new();
        if b.name.trim().is_empty() {
            issues.push(FieldIssue::required("name"));
        }
        let email = b.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            issues.push(FieldIssue::invalid("email", "email must be a valid address"));
        }
        if b.course.trim().is_empty() {
            issues.push(FieldIssue::required("course"));
        }
        match b.year {
            None => issues.push(FieldIssue::required("year")),
            Some(y) if !(1..=MAX_YEAR).contains(&y) => issues.push(FieldIssue::invalid(
                "year",
                format!("year must be between 1 and {MAX_YEAR}"),
            )),
            Some(_) => {}
        }
        if b.bio.trim().is_empty() {
            issues.push(FieldIssue::required("bio"));
        }
        issues
    }

    fn skills_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.skills_teach.is_empty() {
            issues.push(FieldIssue::invalid("skills_teach", "add at least one skill to teach"));
        }
        if self.skills_learn.is_empty() {
            issues.push(FieldIssue::invalid("skills_learn", "add at least one skill to learn"));
        }
        issues
    }

    fn preferences_issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.subjects.is_empty() {
            issues.push(FieldIssue::invalid("subjects", "add at least one subject"));
        }
        if self.learning_style.is_empty() {
            issues.push(FieldIssue::invalid("learning_style", "pick a learning style"));
        }
        if self.interaction_mode.is_empty() {
            issues.push(FieldIssue::invalid("interaction_mode", "pick an interaction mode"));
        }
        if self.availability.is_empty() {
            issues.push(FieldIssue::invalid("availability", "pick when you are available"));
        }
        issues
    }

    /// Reduce the draft to the single-code record the store accepts.
    ///
    /// Does not validate; callers check the draft first.
    pub fn normalize(&self) -> NormalizedProfile {
        let styles: Vec<&str> = self.learning_style.iter().map(|s| s.label()).collect();
        let modes: Vec<&str> = self.interaction_mode.iter().map(|m| m.label()).collect();
        let slots: Vec<String> = self
            .availability
            .iter()
            .map(|a| a.label().to_string())
            .collect();
        let campus = self.basic.campus.trim();
        let bio = self.basic.bio.trim();

        NormalizedProfile {
            full_name: self.basic.name.trim().to_string(),
            email: self.basic.email.trim().to_string(),
            campus: (!campus.is_empty()).then(|| campus.to_string()),
            bio: (!bio.is_empty()).then(|| bio.to_string()),
            interaction_mode: InteractionModeCode::reduce(&modes),
            learning_style: LearningStyleCode::reduce(&styles),
            available_time_slots: (!slots.is_empty()).then_some(slots),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A draft that passes every step.
    pub(crate) fn complete_draft() -> ProfileDraft {
        let mut draft = ProfileDraft {
            basic: BasicInfo {
                name: "Sarah Chen".into(),
                email: "sarah@uni.edu".into(),
                course: "Computer Science".into(),
                campus: "Main Campus".into(),
                year: Some(3),
                bio: "Love helping with Python".into(),
            },
            ..Default::default()
        };
        draft.add_tag(TagField::SkillsTeach, "Python");
        draft.add_tag(TagField::SkillsLearn, "UI/UX Design");
        draft.add_tag(TagField::Subjects, "Algorithms");
        draft.toggle_learning_style(LearningStyle::Visual);
        draft.toggle_interaction_mode(InteractionMode::Online);
        draft.toggle_availability(Availability::Weekends);
        draft
    }

    fn issue_fields(err: &ValidationError) -> Vec<&'static str> {
        err.issues.iter().map(|i| i.field).collect()
    }

    #[test]
    fn toggle_twice_restores_set() {
        let mut set = vec!["a", "b", "c"];
        assert!(!toggle_member(&mut set, "b"));
        assert_eq!(set, vec!["a", "c"]);
        assert!(toggle_member(&mut set, "b"));
        assert_eq!(set, vec!["a", "c", "b"]);

        let mut set = vec!["a", "c"];
        toggle_member(&mut set, "x");
        toggle_member(&mut set, "x");
        assert_eq!(set, vec!["a", "c"]);
    }

    #[test]
    fn add_tag_trims_and_rejects_blank() {
        let mut list = TagList::default();
        assert!(list.add("   ").is_none());
        assert!(list.add("").is_none());
        let id = list.add("  Python ").unwrap();
        assert_eq!(list.values(), vec!["Python"]);
        assert_eq!(list.iter().next().unwrap().id, id);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let list: TagList = ["Excel", "Python", "Excel"].into_iter().collect();
        assert_eq!(list.values(), vec!["Excel", "Python", "Excel"]);
    }

    #[test]
    fn remove_by_id_survives_interleaved_adds() {
        let mut list = TagList::default();
        let a = list.add("A").unwrap();
        let b = list.add("B").unwrap();
        list.add("C");
        assert!(list.remove(a));
        // The id of B still refers to B even though its index shifted.
        list.add("D");
        assert!(list.remove(b));
        assert_eq!(list.values(), vec!["C", "D"]);
        assert!(!list.remove(b));
    }

    #[test]
    fn remove_at_out_of_range_is_noop() {
        let mut draft = ProfileDraft::default();
        draft.add_tag(TagField::Subjects, "Poetry");
        assert!(!draft.remove_tag_at(TagField::Subjects, 1));
        assert!(!draft.remove_tag_at(TagField::Subjects, usize::MAX));
        assert_eq!(draft.subjects.values(), vec!["Poetry"]);
        assert!(draft.remove_tag_at(TagField::Subjects, 0));
        assert!(draft.subjects.is_empty());
    }

    #[test]
    fn tag_list_deserializes_with_or_without_ids() {
        let id = TagId::new();
        let json = serde_json::json!([
            {"id": id.to_string(), "value": " Calculus "},
            {"value": "Statistics"},
            {"value": "   "}
        ]);
        let list: TagList = serde_json::from_value(json).unwrap();
        assert_eq!(list.values(), vec!["Calculus", "Statistics"]);
        assert_eq!(list.iter().next().unwrap().id, id);
    }

    #[test]
    fn basic_info_requires_name_course_year_bio() {
        let draft = ProfileDraft::default();
        let err = draft.validate_step(WizardStep::BasicInfo).unwrap_err();
        assert_eq!(err.step, WizardStep::BasicInfo);
        assert_eq!(issue_fields(&err), vec!["name", "course", "year", "bio"]);
    }

    #[test]
    fn basic_info_email_is_optional_but_checked() {
        let mut draft = complete_draft();
        draft.basic.email.clear();
        assert!(draft.validate_step(WizardStep::BasicInfo).is_ok());

        draft.basic.email = "not-an-email".into();
        let err = draft.validate_step(WizardStep::BasicInfo).unwrap_err();
        assert_eq!(issue_fields(&err), vec!["email"]);
    }

    #[test]
    fn year_must_be_in_range() {
        let mut draft = complete_draft();
        for bad in [0, MAX_YEAR + 1] {
            draft.basic.year = Some(bad);
            let err = draft.validate_step(WizardStep::BasicInfo).unwrap_err();
            assert_eq!(issue_fields(&err), vec!["year"]);
        }
        draft.basic.year = Some(MAX_YEAR);
        assert!(draft.validate_step(WizardStep::BasicInfo).is_ok());
    }

    #[test]
    fn whitespace_name_counts_as_missing() {
        let mut draft = complete_draft();
        draft.basic.name = "   ".into();
        assert!(draft.validate_step(WizardStep::BasicInfo).is_err());
    }

    #[test]
    fn skills_step_needs_both_lists() {
        let mut draft = ProfileDraft::default();
        draft.add_tag(TagField::SkillsTeach, "Python");
        let err = draft.validate_step(WizardStep::Skills).unwrap_err();
        assert_eq!(issue_fields(&err), vec!["skills_learn"]);
        draft.add_tag(TagField::SkillsLearn, "Excel");
        assert!(draft.validate_step(WizardStep::Skills).is_ok());
    }

    #[test]
    fn preferences_step_needs_every_selection() {
        let mut draft = ProfileDraft::default();
        let err = draft.validate_step(WizardStep::Preferences).unwrap_err();
        assert_eq!(
            issue_fields(&err),
            vec!["subjects", "learning_style", "interaction_mode", "availability"]
        );
        draft.add_tag(TagField::Subjects, "Robotics");
        draft.toggle_learning_style(LearningStyle::HandsOn);
        draft.toggle_interaction_mode(InteractionMode::Offline);
        draft.toggle_availability(Availability::Weekends);
        assert!(draft.validate_step(WizardStep::Preferences).is_ok());
    }

    #[test]
    fn validate_all_reports_earliest_failing_step() {
        let mut draft = complete_draft();
        draft.availability.clear();
        draft.skills_learn = TagList::default();
        let err = draft.validate_all().unwrap_err();
        assert_eq!(err.step, WizardStep::Skills);
        assert!(complete_draft().validate_step(WizardStep::Review).is_ok());
    }

    #[test]
    fn toggle_choice_parses_labels() {
        let mut draft = ProfileDraft::default();
        assert!(draft.toggle_choice(ChoiceField::LearningStyle, "Reading/Writing").unwrap());
        assert_eq!(draft.learning_style, vec![LearningStyle::ReadingWriting]);
        assert!(!draft.toggle_choice(ChoiceField::LearningStyle, "Reading/Writing").unwrap());
        assert!(draft.learning_style.is_empty());
        assert!(draft.toggle_choice(ChoiceField::Availability, "Sundays").is_err());
    }

    #[test]
    fn normalize_reduces_selections() {
        let mut draft = complete_draft();
        draft.toggle_interaction_mode(InteractionMode::Offline);
        draft.toggle_learning_style(LearningStyle::Auditory);
        draft.toggle_availability(Availability::WeekdayMornings);
        draft.basic.campus = "  ".into();

        let normalized = draft.normalize();
        assert_eq!(normalized.full_name, "Sarah Chen");
        assert_eq!(normalized.email, "sarah@uni.edu");
        assert_eq!(normalized.campus, None);
        assert_eq!(normalized.bio.as_deref(), Some("Love helping with Python"));
        assert_eq!(normalized.interaction_mode, InteractionModeCode::Hybrid);
        assert_eq!(normalized.learning_style, LearningStyleCode::Mixed);
        assert_eq!(
            normalized.available_time_slots,
            Some(vec!["Weekends".to_string(), "Weekday Mornings".to_string()])
        );
    }

    #[test]
    fn normalize_single_style() {
        let draft = complete_draft();
        let normalized = draft.normalize();
        assert_eq!(normalized.learning_style, LearningStyleCode::Visual);
        assert_eq!(normalized.interaction_mode, InteractionModeCode::Online);
        assert_eq!(normalized.campus.as_deref(), Some("Main Campus"));
    }

    #[test]
    fn draft_json_is_flat() {
        let draft = complete_draft();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["name"], "Sarah Chen");
        assert_eq!(json["year"], 3);
        assert_eq!(json["skills_teach"][0]["value"], "Python");
        assert_eq!(json["learning_style"][0], "Visual");
        let back: ProfileDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }
}
