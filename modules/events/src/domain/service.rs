use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use super::error::DomainError;
use super::model::{Actor, EventSource, EventStatus, EventVisibility, ListFilter, NewEvent, PetEvent};
use super::repo::EventRepository;

/// Timeline use cases. Scope enforcement (`events:read`, `events:create`,
/// `events:void`) happens at the resource layer via the `authz` predicate.
pub struct EventService<R> {
    repo: Arc<R>,
    now: fn() -> DateTime<Utc>,
}

impl<R: EventRepository> EventService<R> {
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

    #[instrument(skip(self, input), fields(pet_id = %pet_id, kind = ?input.kind))]
    pub async fn create(
        &self,
        pet_id: Uuid,
        actor: Actor,
        input: NewEvent,
    ) -> Result<PetEvent, DomainError> {
        if pet_id.is_nil() {
            return Err(DomainError::validation("pet_id", "identifier is required"));
        }
        if actor.id.is_nil() {
            return Err(DomainError::validation("actor", "identifier is required"));
        }

        let event = PetEvent {
            id: Uuid::new_v4(),
            pet_id,
            kind: input.kind,
            occurred_at: input.occurred_at,
            recorded_at: (self.now)(),
            title: input.title.trim().to_owned(),
            notes: input.notes.trim().to_owned(),
            actor,
            source: input.source.unwrap_or(EventSource::Manual),
            visibility: input.visibility.unwrap_or(EventVisibility::SharedWithDelegates),
            status: EventStatus::Active,
        };
        self.repo.create(event.clone()).await?;
        tracing::debug!(event_id = %event.id, "event recorded");
        Ok(event)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PetEvent, DomainError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn list_by_pet(
        &self,
        pet_id: Uuid,
        filter: ListFilter,
    ) -> Result<Vec<PetEvent>, DomainError> {
        Ok(self.repo.list_by_pet(pet_id, filter).await?)
    }

    /// Voids an event. The record is kept, only its status flips.
    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn void(&self, id: Uuid) -> Result<PetEvent, DomainError> {
        if id.is_nil() {
            return Err(DomainError::validation("event_id", "identifier is required"));
        }
        self.repo.void(id).await?;
        tracing::debug!("event voided");
        Ok(self.repo.get_by_id(id).await?)
    }
}
