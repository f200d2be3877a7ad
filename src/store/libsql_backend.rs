//! libSQL backend — async `ProfileStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::profile::{NormalizedProfile, StoredProfile};
use crate::store::migrations;
use crate::store::traits::ProfileStore;

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Connection(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db)?;
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StoreError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StoreError::Connection(format!("Failed to create in-memory database: {e}"))
            })?;

        let backend = Self::from_database(db)?;
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn from_database(db: LibSqlDatabase) -> Result<Self, StoreError> {
        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(format!("Failed to create connection: {e}")))?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Convert `Option<String>` to libsql Value.
fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

/// Map a libsql Row to a StoredProfile.
///
/// Column order matches STUDENT_COLUMNS.
fn row_to_profile(row: &libsql::Row) -> Result<StoredProfile, StoreError> {
    let read = |e: libsql::Error| StoreError::Query(format!("row parse: {e}"));

    let id_str: String = row.get(0).map_err(read)?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| StoreError::Serialization(format!("bad student id {id_str}: {e}")))?;
    let slots_json: Option<String> = row.get::<String>(7).ok();
    let available_time_slots = match slots_json {
        Some(json) => Some(
            serde_json::from_str::<Vec<String>>(&json)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
        ),
        None => None,
    };
    let created_str: String = row.get(8).map_err(read)?;

    Ok(StoredProfile {
        id,
        profile: NormalizedProfile {
            full_name: row.get(1).map_err(read)?,
            email: row.get(2).map_err(read)?,
            campus: row.get::<String>(3).ok(),
            bio: row.get::<String>(4).ok(),
            interaction_mode: row
                .get::<String>(5)
                .map_err(read)?
                .parse()
                .unwrap_or_default(),
            learning_style: row
                .get::<String>(6)
                .map_err(read)?
                .parse()
                .unwrap_or_default(),
            available_time_slots,
        },
        created_at: parse_datetime(&created_str),
    })
}

// ── Trait implementation ────────────────────────────────────────────

const STUDENT_COLUMNS: &str = "id, full_name, email, campus, bio, interaction_mode, learning_style, available_time_slots, created_at";

#[async_trait]
impl ProfileStore for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), StoreError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn create(&self, profile: &NormalizedProfile) -> Result<StoredProfile, StoreError> {
        let id = Uuid::new_v4();
        let created_at = format_timestamp(Utc::now());
        let slots_json = profile
            .available_time_slots
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO students ({STUDENT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                params![
                    id.to_string(),
                    profile.full_name.as_str(),
                    profile.email.as_str(),
                    opt_text(profile.campus.as_deref()),
                    opt_text(profile.bio.as_deref()),
                    profile.interaction_mode.as_str(),
                    profile.learning_style.as_str(),
                    opt_text(slots_json.as_deref()),
                    created_at.as_str(),
                ],
            )
            .await
            .map_err(|e| StoreError::Query(format!("create student: {e}")))?;

        debug!(student_id = %id, "Student profile inserted");
        Ok(StoredProfile {
            id,
            profile: profile.clone(),
            created_at: parse_datetime(&created_at),
        })
    }

    async fn fetch_latest(&self) -> Result<Option<StoredProfile>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at DESC, rowid DESC LIMIT 1"
                ),
                (),
            )
            .await
            .map_err(|e| StoreError::Query(format!("fetch latest student: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => row_to_profile(&row).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::Query(format!("fetch latest student: {e}"))),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{InteractionModeCode, LearningStyleCode};

    async fn test_db() -> LibSqlBackend {
        LibSqlBackend::new_memory().await.unwrap()
    }

    fn make_profile(name: &str) -> NormalizedProfile {
        NormalizedProfile {
            full_name: name.to_string(),
            email: format!("{}@uni.edu", name.to_lowercase()),
            campus: Some("Main Campus".into()),
            bio: Some("Happy to study together".into()),
            interaction_mode: InteractionModeCode::Hybrid,
            learning_style: LearningStyleCode::ReadingWriting,
            available_time_slots: Some(vec!["Weekends".into(), "Weekday Evenings".into()]),
        }
    }

    #[tokio::test]
    async fn fetch_latest_on_empty_table_is_none() {
        let db = test_db().await;
        assert!(db.fetch_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_then_fetch_latest() {
        let db = test_db().await;
        let created = db.create(&make_profile("Alice")).await.unwrap();
        let latest = db.fetch_latest().await.unwrap().unwrap();
        assert_eq!(latest, created);
        assert_eq!(latest.profile.interaction_mode, InteractionModeCode::Hybrid);
        assert_eq!(latest.profile.learning_style, LearningStyleCode::ReadingWriting);
        assert_eq!(
            latest.profile.available_time_slots.as_deref(),
            Some(&["Weekends".to_string(), "Weekday Evenings".to_string()][..])
        );
    }

    #[tokio::test]
    async fn fetch_latest_returns_newest() {
        let db = test_db().await;
        db.create(&make_profile("Alice")).await.unwrap();
        db.create(&make_profile("Bob")).await.unwrap();
        let newest = db.create(&make_profile("Carol")).await.unwrap();

        let latest = db.fetch_latest().await.unwrap().unwrap();
        assert_eq!(latest.id, newest.id);
        assert_eq!(latest.profile.full_name, "Carol");
    }

    #[tokio::test]
    async fn optional_columns_roundtrip_as_null() {
        let db = test_db().await;
        let profile = NormalizedProfile {
            campus: None,
            bio: None,
            available_time_slots: None,
            ..make_profile("Dana")
        };
        db.create(&profile).await.unwrap();

        let latest = db.fetch_latest().await.unwrap().unwrap();
        assert_eq!(latest.profile.campus, None);
        assert_eq!(latest.profile.bio, None);
        assert_eq!(latest.profile.available_time_slots, None);
    }

    #[tokio::test]
    async fn new_local_creates_directory_and_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("skill-buddy.db");

        {
            let db = LibSqlBackend::new_local(&path).await.unwrap();
            db.create(&make_profile("Eve")).await.unwrap();
        }
        assert!(path.exists());

        let reopened = LibSqlBackend::new_local(&path).await.unwrap();
        let latest = reopened.fetch_latest().await.unwrap().unwrap();
        assert_eq!(latest.profile.full_name, "Eve");
    }

    #[test]
    fn timestamps_sort_as_text() {
        let earlier = format_timestamp(parse_datetime("2026-01-01T09:00:00Z"));
        let later = format_timestamp(parse_datetime("2026-01-01T10:00:00.5Z"));
        assert!(earlier < later);
        assert_eq!(earlier.len(), later.len());
    }
}
