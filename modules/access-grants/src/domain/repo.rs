//! Storage contract for grant records.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::model::Grant;

/// Errors surfaced by grant store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("grant already exists")]
    AlreadyExists,

    #[error("grant not found")]
    NotFound,

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable keyed storage of grant records.
///
/// The store is the single source of truth: implementations must serialize
/// mutations so that concurrent updates to one grant linearize (one update
/// wins and subsequent reads see it).
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Inserts a new grant. Fails with [`StoreError::AlreadyExists`] if a
    /// grant with the same id is already stored.
    async fn create(&self, grant: Grant) -> Result<(), StoreError>;

    /// Replaces a stored grant. Fails with [`StoreError::NotFound`] if no
    /// grant with that id exists.
    async fn update(&self, grant: Grant) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Grant, StoreError>;

    /// All grants for a pet, any status, no ordering guarantee.
    async fn list_by_pet(&self, pet_id: Uuid) -> Result<Vec<Grant>, StoreError>;

    /// All grants held by a grantee, any status, no ordering guarantee.
    async fn list_by_grantee(&self, grantee_user_id: Uuid) -> Result<Vec<Grant>, StoreError>;

    /// The single active grant for the (pet, grantee) pair.
    ///
    /// If dirty data holds more than one active match, implementations must
    /// pick the winner by the maximum [`Grant::recency_key`] rather than by
    /// iteration order.
    async fn get_active_grant(
        &self,
        pet_id: Uuid,
        grantee_user_id: Uuid,
    ) -> Result<Grant, StoreError>;
}
