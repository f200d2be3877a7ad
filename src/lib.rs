//! SkillBuddy — student skill exchange: onboarding wizard, partner search
//! and profile storage.

pub mod config;
pub mod error;
pub mod explore;
pub mod extract;
pub mod onboarding;
pub mod profile;
pub mod server;
pub mod store;
