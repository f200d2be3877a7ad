//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Server configuration, built from `SKILL_BUDDY_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port.
    pub port: u16,
    /// libSQL database file.
    pub db_path: PathBuf,
    /// JSON file with the student directory. `None` uses the demo students.
    pub students_path: Option<PathBuf>,
    /// Minutes a wizard session may sit untouched before it is pruned.
    pub session_idle_minutes: u32,
    /// Allowed CORS origin. `None` allows any origin.
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: PathBuf::from("./data/skill-buddy.db"),
            students_path: None,
            session_idle_minutes: 30,
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Unset or blank keys use defaults;
    /// values that fail to parse are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let session_idle_minutes = parse_or(
            &get,
            "SKILL_BUDDY_SESSION_IDLE_MIN",
            defaults.session_idle_minutes,
        )?;
        if session_idle_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SKILL_BUDDY_SESSION_IDLE_MIN".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            port: parse_or(&get, "SKILL_BUDDY_PORT", defaults.port)?,
            db_path: get("SKILL_BUDDY_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            students_path: get("SKILL_BUDDY_STUDENTS_PATH").map(PathBuf::from),
            session_idle_minutes,
            cors_origin: get("SKILL_BUDDY_CORS_ORIGIN"),
        })
    }

    pub fn session_idle(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_idle_minutes))
    }
}

fn parse_or<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
    }
}
