use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use super::error::DomainError;
use super::model::{NewPet, Pet, PetProfilePatch};
use super::repo::PetRepository;

/// Pet profile use cases.
///
/// Authorization (owner or delegate with `pet:edit_profile`) is enforced by
/// the resource layer through the `authz` predicate before these methods are
/// reached; the service itself only validates inputs.
pub struct PetService<R> {
    repo: Arc<R>,
    now: fn() -> DateTime<Utc>,
}

impl<R: PetRepository> PetService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            now: Utc::now,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(repo: Arc<R>, now: fn() -> DateTime<Utc>) -> Self {
        Self { repo, now }
    }

    #[instrument(skip(self, input), fields(owner_user_id = %owner_user_id))]
    pub async fn create(&self, owner_user_id: Uuid, input: NewPet) -> Result<Pet, DomainError> {
        if owner_user_id.is_nil() {
            return Err(DomainError::validation(
                "owner_user_id",
                "identifier is required",
            ));
        }
        let name = required_trimmed("name", &input.name)?;
        let species = required_trimmed("species", &input.species)?;

        let now = (self.now)();
        let pet = Pet {
            id: Uuid::new_v4(),
            owner_user_id,
            name,
            species,
            breed: input.breed.trim().to_owned(),
            sex: input.sex.trim().to_owned(),
            birth_date: input.birth_date,
            microchip: input.microchip.trim().to_owned(),
            notes: input.notes.trim().to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(pet.clone()).await?;
        tracing::debug!(pet_id = %pet.id, "pet registered");
        Ok(pet)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Pet, DomainError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn list_by_owner(&self, owner_user_id: Uuid) -> Result<Vec<Pet>, DomainError> {
        Ok(self.repo.list_by_owner(owner_user_id).await?)
    }

    /// Applies a PATCH-style profile update. `None` fields stay untouched;
    /// an explicit-null birth date clears the stored one.
    #[instrument(skip(self, patch), fields(pet_id = %pet_id))]
    pub async fn update_profile(
        &self,
        pet_id: Uuid,
        patch: PetProfilePatch,
    ) -> Result<Pet, DomainError> {
        if pet_id.is_nil() {
            return Err(DomainError::validation("pet_id", "identifier is required"));
        }

        let mut pet = self.repo.get_by_id(pet_id).await?;

        if let Some(name) = patch.name {
            // The profile always keeps a name; PATCH cannot blank it.
            pet.name = required_trimmed("name", &name)?;
        }
        if let Some(species) = patch.species {
            pet.species = species.trim().to_owned();
        }
        if let Some(breed) = patch.breed {
            pet.breed = breed.trim().to_owned();
        }
        if let Some(sex) = patch.sex {
            pet.sex = sex.trim().to_owned();
        }
        if let Some(microchip) = patch.microchip {
            pet.microchip = microchip.trim().to_owned();
        }
        if let Some(notes) = patch.notes {
            pet.notes = notes.trim().to_owned();
        }
        if let Some(birth_date) = patch.birth_date {
            pet.birth_date = birth_date;
        }

        pet.updated_at = (self.now)();
        self.repo.update(pet.clone()).await?;
        tracing::debug!("pet profile updated");
        Ok(pet)
    }

    /// The owning user of a pet. Used by the authorization predicate.
    pub async fn owner_of(&self, pet_id: Uuid) -> Result<Uuid, DomainError> {
        let pet = self.repo.get_by_id(pet_id).await?;
        Ok(pet.owner_user_id)
    }
}

fn required_trimmed(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_owned())
}
