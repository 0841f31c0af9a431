//! Ownership lookup for the authorization predicate.
//!
//! The trait lives in the `authz` crate; implementing it here keeps the pets
//! and access-grants modules free of a dependency cycle.

use async_trait::async_trait;
use authz::{OwnershipError, PetOwnerLookup};
use uuid::Uuid;

use super::repo::PetRepository;
use super::service::PetService;

#[async_trait]
impl<R: PetRepository> PetOwnerLookup for PetService<R> {
    async fn owner_of(&self, pet_id: Uuid) -> Result<Uuid, OwnershipError> {
        PetService::owner_of(self, pet_id)
            .await
            .map_err(|_| OwnershipError::PetNotFound)
    }
}
