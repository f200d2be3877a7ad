//! Filter engine for the explore page.
//!
//! Pure functions over a candidate slice. A candidate matches when the text
//! query hits its name or course and, for every attribute with a non-empty
//! selection, it shares at least one value with that selection.

use serde::{Deserialize, Serialize};

use crate::profile::StudentProfile;
use crate::profile::draft::toggle_member;

/// One of the six multi-select attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    SkillsTeach,
    SkillsLearn,
    Subjects,
    LearningStyle,
    InteractionMode,
    Availability,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        Self::SkillsTeach,
        Self::SkillsLearn,
        Self::Subjects,
        Self::LearningStyle,
        Self::InteractionMode,
        Self::Availability,
    ];

    /// The candidate's values for this attribute.
    pub fn values(self, profile: &StudentProfile) -> &[String] {
        match self {
            Self::SkillsTeach => &profile.skills_teach,
            Self::SkillsLearn => &profile.skills_learn,
            Self::Subjects => &profile.subjects,
            Self::LearningStyle => &profile.learning_style,
            Self::InteractionMode => &profile.interaction_mode,
            Self::Availability => &profile.availability,
        }
    }
}

/// What the user has typed and ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub query: String,
    pub skills_teach: Vec<String>,
    pub skills_learn: Vec<String>,
    pub subjects: Vec<String>,
    pub learning_style: Vec<String>,
    pub interaction_mode: Vec<String>,
    pub availability: Vec<String>,
}

impl FilterSelection {
    pub fn selected(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::SkillsTeach => &self.skills_teach,
            FilterField::SkillsLearn => &self.skills_learn,
            FilterField::Subjects => &self.subjects,
            FilterField::LearningStyle => &self.learning_style,
            FilterField::InteractionMode => &self.interaction_mode,
            FilterField::Availability => &self.availability,
        }
    }

    fn selected_mut(&mut self, field: FilterField) -> &mut Vec<String> {
        match field {
            FilterField::SkillsTeach => &mut self.skills_teach,
            FilterField::SkillsLearn => &mut self.skills_learn,
            FilterField::Subjects => &mut self.subjects,
            FilterField::LearningStyle => &mut self.learning_style,
            FilterField::InteractionMode => &mut self.interaction_mode,
            FilterField::Availability => &mut self.availability,
        }
    }

    /// Tick or untick a value. Returns true if it is now selected.
    pub fn toggle(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        toggle_member(self.selected_mut(field), value.into())
    }

    /// Clear the query and every selection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && FilterField::ALL.iter().all(|f| self.selected(*f).is_empty())
    }

    /// Whether one candidate passes every active constraint.
    pub fn matches(&self, profile: &StudentProfile) -> bool {
        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            if !profile.name.to_lowercase().contains(&needle)
                && !profile.course.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        FilterField::ALL.iter().all(|&field| {
            let selected = self.selected(field);
            selected.is_empty() || selected.iter().any(|v| field.values(profile).contains(v))
        })
    }
}

/// Candidates that match `selection`, in their original order.
pub fn filter_profiles<'a>(
    candidates: &'a [StudentProfile],
    selection: &FilterSelection,
) -> Vec<&'a StudentProfile> {
    candidates.iter().filter(|p| selection.matches(p)).collect()
}

/// Every selectable value per attribute, deduplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub skills_teach: Vec<String>,
    pub skills_learn: Vec<String>,
    pub subjects: Vec<String>,
    pub learning_style: Vec<String>,
    pub interaction_mode: Vec<String>,
    pub availability: Vec<String>,
}

impl FilterOptions {
    pub fn from_candidates(candidates: &[StudentProfile]) -> Self {
        let collect = |field: FilterField| {
            let mut seen: Vec<String> = Vec::new();
            for value in candidates.iter().flat_map(|p| field.values(p)) {
                if !seen.contains(value) {
                    seen.push(value.clone());
                }
            }
            seen
        };

        Self {
            skills_teach: collect(FilterField::SkillsTeach),
            skills_learn: collect(FilterField::SkillsLearn),
            subjects: collect(FilterField::Subjects),
            learning_style: collect(FilterField::LearningStyle),
            interaction_mode: collect(FilterField::InteractionMode),
            availability: collect(FilterField::Availability),
        }
    }

    pub fn get(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::SkillsTeach => &self.skills_teach,
            FilterField::SkillsLearn => &self.skills_learn,
            FilterField::Subjects => &self.subjects,
            FilterField::LearningStyle => &self.learning_style,
            FilterField::InteractionMode => &self.interaction_mode,
            FilterField::Availability => &self.availability,
        }
    }
}
