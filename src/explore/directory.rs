//! StudentDirectory — the candidate set behind the explore page, plus the
//! signed-in user's own profile.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::demo::{demo_current_user, demo_students};
use super::filter::{FilterOptions, FilterSelection, filter_profiles};
use crate::error::{ConfigError, ValidationError};
use crate::profile::{ProfileDraft, ProfileEditor, StudentProfile};

/// Acknowledgement shown after "Contact" is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactReceipt {
    pub title: String,
    pub description: String,
}

pub struct StudentDirectory {
    students: RwLock<Arc<Vec<StudentProfile>>>,
    current_user: RwLock<StudentProfile>,
}

impl StudentDirectory {
    pub fn new(students: Vec<StudentProfile>, current_user: StudentProfile) -> Arc<Self> {
        Arc::new(Self {
            students: RwLock::new(Arc::new(students)),
            current_user: RwLock::new(current_user),
        })
    }

    /// Directory seeded with the built-in demo students.
    pub fn demo() -> Arc<Self> {
        Self::new(demo_students(), demo_current_user())
    }

    /// Load students from a JSON array of profiles.
    pub fn from_json_file(path: &Path) -> Result<Arc<Self>, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let students = parse_students(&raw).map_err(|reason| ConfigError::StudentFile {
            path: path.display().to_string(),
            reason,
        })?;
        info!(path = %path.display(), count = students.len(), "Loaded student directory");
        Ok(Self::new(students, demo_current_user()))
    }

    /// The current candidate set. Readers keep their snapshot even if it
    /// is replaced afterwards.
    pub async fn snapshot(&self) -> Arc<Vec<StudentProfile>> {
        Arc::clone(&*self.students.read().await)
    }

    /// Swap in a new candidate set.
    pub async fn replace(&self, students: Vec<StudentProfile>) {
        let count = students.len();
        *self.students.write().await = Arc::new(students);
        info!(count, "Student directory replaced");
    }

    pub async fn get(&self, id: &str) -> Option<StudentProfile> {
        self.snapshot().await.iter().find(|s| s.id == id).cloned()
    }

    pub async fn search(&self, selection: &FilterSelection) -> Vec<StudentProfile> {
        let snapshot = self.snapshot().await;
        let matches: Vec<StudentProfile> = filter_profiles(&snapshot, selection)
            .into_iter()
            .cloned()
            .collect();
        debug!(matched = matches.len(), total = snapshot.len(), "Student search");
        matches
    }

    pub async fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_candidates(&self.snapshot().await)
    }

    /// Record a contact request. No message is delivered yet; the receipt
    /// is what the client shows.
    pub async fn contact(&self, id: &str) -> Option<ContactReceipt> {
        let student = self.get(id).await?;
        info!(student_id = %student.id, name = %student.name, "Contact request sent");
        Some(ContactReceipt {
            title: "Contact Request Sent!".to_string(),
            description: format!("Your message to {} has been sent.", student.name),
        })
    }

    pub async fn current_user(&self) -> StudentProfile {
        self.current_user.read().await.clone()
    }

    /// Replace the signed-in user's profile with an edited draft.
    ///
    /// The draft goes through the same checks as the wizard; id and photo
    /// are kept.
    pub async fn update_current_user(
        &self,
        draft: ProfileDraft,
    ) -> Result<StudentProfile, ValidationError> {
        let mut current = self.current_user.write().await;
        let updated = ProfileEditor::load(&current).with_draft(draft).save()?;
        *current = updated.clone();
        info!(student_id = %updated.id, "Profile updated");
        Ok(updated)
    }
}

fn parse_students(raw: &str) -> Result<Vec<StudentProfile>, String> {
    let students: Vec<StudentProfile> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let mut seen = HashSet::new();
    for student in &students {
        if !seen.insert(student.id.as_str()) {
            return Err(format!("duplicate student id {}", student.id));
        }
    }
    Ok(students)
}
