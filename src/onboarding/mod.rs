//! Onboarding — the four-step profile wizard.
//!
//! A student fills in basic info, skills, then preferences, reviews the
//! result and submits it. Each open wizard lives in a session owned by the
//! `WizardManager`; submitting persists the normalized profile through a
//! `ProfileStore`.

pub mod manager;
pub mod routes;
pub mod state;
pub mod wizard;

pub use manager::{WizardHandle, WizardManager, spawn_session_sweeper};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use state::{STEP_COUNT, WizardStep};
pub use wizard::{Wizard, WizardView};
