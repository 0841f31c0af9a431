//! In-memory reference implementation of the pet store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::model::Pet;
use crate::domain::repo::{PetRepository, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryPetRepository {
    pets: RwLock<HashMap<Uuid, Pet>>,
}

impl InMemoryPetRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn create(&self, pet: Pet) -> Result<(), StoreError> {
        let mut pets = self.pets.write();
        if pets.contains_key(&pet.id) {
            return Err(StoreError::AlreadyExists);
        }
        pets.insert(pet.id, pet);
        Ok(())
    }

    async fn update(&self, pet: Pet) -> Result<(), StoreError> {
        let mut pets = self.pets.write();
        if !pets.contains_key(&pet.id) {
            return Err(StoreError::NotFound);
        }
        pets.insert(pet.id, pet);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Pet, StoreError> {
        self.pets
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_owner(&self, owner_user_id: Uuid) -> Result<Vec<Pet>, StoreError> {
        Ok(self
            .pets
            .read()
            .values()
            .filter(|p| p.owner_user_id == owner_user_id)
            .cloned()
            .collect())
    }
}
