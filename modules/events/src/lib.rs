//! Clinical timeline events: the append-mostly history of a pet.
//!
//! Events are never deleted; voiding flips their status while keeping the
//! record. Reading, creating and voiding are scope-gated by the resource
//! layer through the `authz` predicate.

pub mod domain;
pub mod infra;

pub use domain::error::DomainError;
pub use domain::model::{
    Actor, ActorKind, EventKind, EventSource, EventStatus, EventVisibility, ListFilter, NewEvent,
    PetEvent,
};
pub use domain::repo::{EventRepository, StoreError};
pub use domain::service::EventService;
pub use infra::storage::memory::InMemoryEventRepository;
