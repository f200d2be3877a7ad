//! `ProfileStore` trait — the async persistence interface the wizard and
//! the API depend on.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::profile::{NormalizedProfile, StoredProfile};

/// Backend-agnostic profile storage.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), StoreError>;

    /// Persist a new profile. The store assigns `id` and `created_at`.
    async fn create(&self, profile: &NormalizedProfile) -> Result<StoredProfile, StoreError>;

    /// The most recently created profile, or `None` when there are none.
    async fn fetch_latest(&self) -> Result<Option<StoredProfile>, StoreError>;
}
