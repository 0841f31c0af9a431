//! Pet profiles: the thin resource domain around the delegated-access core.
//!
//! Besides profile CRUD, this crate answers the one question the
//! authorization predicate needs from it: who owns a given pet.

pub mod domain;
pub mod infra;

pub use domain::error::DomainError;
pub use domain::model::{NewPet, Pet, PetProfilePatch};
pub use domain::repo::{PetRepository, StoreError};
pub use domain::service::PetService;
pub use infra::storage::memory::InMemoryPetRepository;
