//! Wizard step state machine — which page of the profile wizard the user is on.

use serde::{Deserialize, Serialize};

/// The steps of the profile wizard.
///
/// Progresses linearly: BasicInfo → Skills → Preferences → Review.
/// `Submitted` is terminal and only reachable through a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BasicInfo,
    Skills,
    Preferences,
    Review,
    Submitted,
}

impl WizardStep {
    /// Check if moving from `self` to `target` is a legal transition.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        use WizardStep::*;
        matches!(
            (self, target),
            (BasicInfo, Skills)
                | (Skills, Preferences)
                | (Preferences, Review)
                | (Review, Submitted)
                | (Skills, BasicInfo)
                | (Preferences, Skills)
                | (Review, Preferences)
        )
    }

    /// Whether the wizard is finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// The next page of the form. `Review` has none; submitting is a
    /// separate action.
    pub fn next(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            BasicInfo => Some(Skills),
            Skills => Some(Preferences),
            Preferences => Some(Review),
            Review | Submitted => None,
        }
    }

    /// The previous page of the form, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        use WizardStep::*;
        match self {
            Skills => Some(BasicInfo),
            Preferences => Some(Skills),
            Review => Some(Preferences),
            BasicInfo | Submitted => None,
        }
    }

    /// 1-based position shown in the "Step N of 4" indicator.
    pub fn number(&self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::Skills => 2,
            Self::Preferences => 3,
            Self::Review | Self::Submitted => 4,
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::BasicInfo
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BasicInfo => "basic_info",
            Self::Skills => "skills",
            Self::Preferences => "preferences",
            Self::Review => "review",
            Self::Submitted => "submitted",
        };
        write!(f, "{s}")
    }
}

/// Number of form pages.
pub const STEP_COUNT: u8 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions() {
        use WizardStep::*;
        for (from, to) in [
            (BasicInfo, Skills),
            (Skills, Preferences),
            (Preferences, Review),
            (Review, Submitted),
        ] {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use WizardStep::*;
        // Skip steps
        assert!(!BasicInfo.can_transition_to(Preferences));
        assert!(!Skills.can_transition_to(Submitted));
        // Leave the terminal state
        assert!(!Submitted.can_transition_to(Review));
        assert!(!Submitted.can_transition_to(BasicInfo));
        // Self-transition
        assert!(!Skills.can_transition_to(Skills));
    }

    #[test]
    fn next_walks_form_pages() {
        use WizardStep::*;
        let mut current = BasicInfo;
        for expected in [Skills, Preferences, Review] {
            current = current.next().unwrap();
            assert_eq!(current, expected);
        }
        assert!(current.next().is_none());
        assert!(Submitted.next().is_none());
    }

    #[test]
    fn previous_is_inverse_of_next() {
        use WizardStep::*;
        for step in [BasicInfo, Skills, Preferences] {
            let next = step.next().unwrap();
            assert_eq!(next.previous(), Some(step));
        }
        assert!(BasicInfo.previous().is_none());
        assert!(Submitted.previous().is_none());
    }

    #[test]
    fn numbers_match_indicator() {
        use WizardStep::*;
        assert_eq!(BasicInfo.number(), 1);
        assert_eq!(Skills.number(), 2);
        assert_eq!(Preferences.number(), 3);
        assert_eq!(Review.number(), STEP_COUNT);
    }

    #[test]
    fn display_matches_serde() {
        use WizardStep::*;
        for step in [BasicInfo, Skills, Preferences, Review, Submitted] {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "Display and serde should match for {step:?}");
        }
    }

    #[test]
    fn terminal() {
        assert!(WizardStep::Submitted.is_terminal());
        assert!(!WizardStep::Review.is_terminal());
    }
}
