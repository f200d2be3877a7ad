//! Student profile records and the fixed choice lists they draw from.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fixed set of options a student picks from (rendered as chips).
pub trait Choice: Copy + Eq + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Human-readable label; also the wire value.
    fn label(&self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

/// A label that is not one of the allowed options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} option: {value}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

fn parse_choice<T: Choice>(kind: &'static str, s: &str) -> Result<T, UnknownChoice> {
    T::from_label(s).ok_or_else(|| UnknownChoice {
        kind,
        value: s.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningStyle {
    Visual,
    Auditory,
    #[serde(rename = "Reading/Writing")]
    ReadingWriting,
    #[serde(rename = "Hands-on")]
    HandsOn,
}

impl Choice for LearningStyle {
    const ALL: &'static [Self] = &[
        Self::Visual,
        Self::Auditory,
        Self::ReadingWriting,
        Self::HandsOn,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Visual => "Visual",
            Self::Auditory => "Auditory",
            Self::ReadingWriting => "Reading/Writing",
            Self::HandsOn => "Hands-on",
        }
    }
}

impl FromStr for LearningStyle {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("learning style", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Online,
    Offline,
}

impl Choice for InteractionMode {
    const ALL: &'static [Self] = &[Self::Online, Self::Offline];

    fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

impl FromStr for InteractionMode {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("interaction mode", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Weekday Mornings")]
    WeekdayMornings,
    #[serde(rename = "Weekday Afternoons")]
    WeekdayAfternoons,
    #[serde(rename = "Weekday Evenings")]
    WeekdayEvenings,
    Weekends,
}

impl Choice for Availability {
    const ALL: &'static [Self] = &[
        Self::WeekdayMornings,
        Self::WeekdayAfternoons,
        Self::WeekdayEvenings,
        Self::Weekends,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::WeekdayMornings => "Weekday Mornings",
            Self::WeekdayAfternoons => "Weekday Afternoons",
            Self::WeekdayEvenings => "Weekday Evenings",
            Self::Weekends => "Weekends",
        }
    }
}

impl FromStr for Availability {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("availability", s)
    }
}

/// Single interaction-mode code stored with a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionModeCode {
    Online,
    Offline,
    Hybrid,
}

impl InteractionModeCode {
    /// Collapse the selected modes into one code.
    ///
    /// Both online and offline → hybrid; only offline → offline; anything
    /// else, including nothing selected, → online.
    pub fn reduce<S: AsRef<str>>(modes: &[S]) -> Self {
        let has = |wanted: &str| {
            modes
                .iter()
                .any(|m| m.as_ref().to_lowercase() == wanted)
        };
        match (has("online"), has("offline")) {
            (true, true) => Self::Hybrid,
            (false, true) => Self::Offline,
            _ => Self::Online,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        }
    }
}

impl Default for InteractionModeCode {
    fn default() -> Self {
        Self::Online
    }
}

impl std::fmt::Display for InteractionModeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionModeCode {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(UnknownChoice {
                kind: "interaction mode code",
                value: other.to_string(),
            }),
        }
    }
}

/// Single learning-style code stored with a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyleCode {
    Visual,
    Auditory,
    ReadingWriting,
    Kinesthetic,
    Mixed,
}

impl LearningStyleCode {
    /// Collapse the selected styles into one code.
    ///
    /// Zero or several styles → mixed. A single style maps by
    /// case-insensitive substring of its label.
    pub fn reduce<S: AsRef<str>>(styles: &[S]) -> Self {
        match styles {
            [only] => Self::from_label(only.as_ref()),
            _ => Self::Mixed,
        }
    }

    /// Map one style label to its code; unrecognized labels are `Mixed`.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("visual") {
            Self::Visual
        } else if label.contains("auditory") {
            Self::Auditory
        } else if label.contains("reading") {
            Self::ReadingWriting
        } else if label.contains("hand") {
            Self::Kinesthetic
        } else {
            Self::Mixed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Auditory => "auditory",
            Self::ReadingWriting => "reading_writing",
            Self::Kinesthetic => "kinesthetic",
            Self::Mixed => "mixed",
        }
    }
}

impl Default for LearningStyleCode {
    fn default() -> Self {
        Self::Mixed
    }
}

impl std::fmt::Display for LearningStyleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningStyleCode {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visual" => Ok(Self::Visual),
            "auditory" => Ok(Self::Auditory),
            "reading_writing" => Ok(Self::ReadingWriting),
            "kinesthetic" => Ok(Self::Kinesthetic),
            "mixed" => Ok(Self::Mixed),
            other => Err(UnknownChoice {
                kind: "learning style code",
                value: other.to_string(),
            }),
        }
    }
}

/// The record handed to the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    pub full_name: String,
    pub email: String,
    pub campus: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub interaction_mode: InteractionModeCode,
    #[serde(default)]
    pub learning_style: LearningStyleCode,
    pub available_time_slots: Option<Vec<String>>,
}

/// A profile row as persisted, with store-assigned identity and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: NormalizedProfile,
    pub created_at: DateTime<Utc>,
}

/// A student as shown on the explore page.
///
/// Keeps the multi-value lists (not the reduced codes) since filtering
/// and display both need them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub course: String,
    pub year: u8,
    pub bio: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub skills_teach: Vec<String>,
    #[serde(default)]
    pub skills_learn: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub learning_style: Vec<String>,
    #[serde(default)]
    pub interaction_mode: Vec<String>,
    #[serde(default)]
    pub availability: Vec<String>,
}
