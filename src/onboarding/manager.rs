//! WizardManager — in-flight onboarding sessions keyed by id.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::wizard::Wizard;
use crate::error::SessionError;
use crate::profile::StoredProfile;
use crate::store::ProfileStore;

/// Shared handle to one session's wizard.
pub type WizardHandle = Arc<Mutex<Wizard>>;

struct Session {
    wizard: WizardHandle,
    last_touched: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            wizard: Arc::new(Mutex::new(Wizard::new())),
            last_touched: Utc::now(),
        }
    }
}

/// Owns every open wizard and the store they submit to.
pub struct WizardManager {
    store: Arc<dyn ProfileStore>,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl WizardManager {
    pub fn new(store: Arc<dyn ProfileStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Open a new session with an empty wizard.
    pub async fn create(&self) -> (Uuid, WizardHandle) {
        let id = Uuid::new_v4();
        let session = Session::new();
        let handle = Arc::clone(&session.wizard);
        self.sessions.write().await.insert(id, session);
        debug!(session_id = %id, "Wizard session opened");
        (id, handle)
    }

    /// Look up a session and mark it as used.
    pub async fn get(&self, id: Uuid) -> Option<WizardHandle> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id)?;
        session.last_touched = Utc::now();
        Some(Arc::clone(&session.wizard))
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn discard(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "Wizard session discarded");
        }
        removed
    }

    /// Submit the session's draft and close the session on success.
    ///
    /// The wizard lock is held across the store call, so a second submit on
    /// the same session waits and then sees `AlreadySubmitted`.
    pub async fn submit(&self, id: Uuid) -> Result<StoredProfile, SessionError> {
        let handle = self.get(id).await.ok_or(SessionError::NotFound(id))?;
        let mut wizard = handle.lock().await;
        let stored = wizard.submit(self.store.as_ref()).await?;
        drop(wizard);

        // A session discarded mid-submit is already gone; nothing to revive.
        self.sessions.write().await.remove(&id);
        Ok(stored)
    }

    /// Drop sessions untouched for longer than `max_idle`. Returns how many.
    pub async fn prune_idle(&self, max_idle: chrono::Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_touched >= cutoff);
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!(pruned, remaining = sessions.len(), "Pruned idle wizard sessions");
        }
        pruned
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn a background task that prunes idle sessions every 60 seconds.
pub fn spawn_session_sweeper(
    manager: Arc<WizardManager>,
    max_idle: chrono::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            manager.prune_idle(max_idle).await;
        }
    })
}
