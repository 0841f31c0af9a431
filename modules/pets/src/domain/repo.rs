use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::model::Pet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("pet already exists")]
    AlreadyExists,

    #[error("pet not found")]
    NotFound,

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create(&self, pet: Pet) -> Result<(), StoreError>;

    async fn update(&self, pet: Pet) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Pet, StoreError>;

    async fn list_by_owner(&self, owner_user_id: Uuid) -> Result<Vec<Pet>, StoreError>;
}
