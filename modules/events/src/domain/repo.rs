use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::model::{ListFilter, PetEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("event already exists")]
    AlreadyExists,

    #[error("event not found")]
    NotFound,

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: PetEvent) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<PetEvent, StoreError>;

    /// Filtered listing for a pet's timeline, newest occurrence first.
    async fn list_by_pet(
        &self,
        pet_id: Uuid,
        filter: ListFilter,
    ) -> Result<Vec<PetEvent>, StoreError>;

    /// Marks an event voided. The record stays.
    async fn void(&self, id: Uuid) -> Result<(), StoreError>;
}
