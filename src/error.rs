//! Error types for SkillBuddy.

use serde::Serialize;

use crate::onboarding::state::WizardStep;
use crate::profile::model::UnknownChoice;

/// Startup errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse student directory {path}: {reason}")]
    StudentFile { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Profile store errors. Every variant carries a message fit to show a user.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// What is wrong with a single draft field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{field} is required"),
        }
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A wizard step whose required fields are not all filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Step {step} is incomplete: {}", summarize(.issues))]
pub struct ValidationError {
    pub step: WizardStep,
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wizard transition errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Incomplete(#[from] ValidationError),

    #[error("Profile can only be submitted from the review step (currently at {step})")]
    NotAtReview { step: WizardStep },

    #[error(transparent)]
    InvalidChoice(#[from] UnknownChoice),

    #[error("Already at the first step")]
    NoPreviousStep,

    #[error("Profile was already submitted")]
    AlreadySubmitted,

    #[error("Failed to save profile: {0}")]
    Store(#[from] StoreError),
}

/// Errors from the wizard session map.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(uuid::Uuid),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
