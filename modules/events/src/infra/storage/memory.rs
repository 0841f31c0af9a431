//! In-memory reference implementation of the event store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::model::{EventStatus, ListFilter, PetEvent};
use crate::domain::repo::{EventRepository, StoreError};

const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: RwLock<HashMap<Uuid, PetEvent>>,
}

impl InMemoryEventRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(event: &PetEvent, filter: &ListFilter) -> bool {
    if !filter.kinds.is_empty() && !filter.kinds.contains(&event.kind) {
        return false;
    }
    if let Some(from) = filter.from {
        if event.occurred_at < from {
            return false;
        }
    }
    if let Some(to) = filter.to {
        if event.occurred_at > to {
            return false;
        }
    }
    if let Some(query) = filter.query.as_deref() {
        let query = query.trim().to_lowercase();
        if !query.is_empty() {
            let haystack = format!("{} {}", event.title, event.notes).to_lowercase();
            if !haystack.contains(&query) {
                return false;
            }
        }
    }
    true
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: PetEvent) -> Result<(), StoreError> {
        let mut events = self.events.write();
        if events.contains_key(&event.id) {
            return Err(StoreError::AlreadyExists);
        }
        events.insert(event.id, event);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<PetEvent, StoreError> {
        self.events
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_pet(
        &self,
        pet_id: Uuid,
        filter: ListFilter,
    ) -> Result<Vec<PetEvent>, StoreError> {
        let mut out: Vec<PetEvent> = self
            .events
            .read()
            .values()
            .filter(|e| e.pet_id == pet_id && matches(e, &filter))
            .cloned()
            .collect();

        // Newest occurrence first.
        out.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        let limit = match filter.limit {
            Some(n) if n > 0 => n,
            _ => DEFAULT_LIMIT,
        };
        out.truncate(limit);
        Ok(out)
    }

    async fn void(&self, id: Uuid) -> Result<(), StoreError> {
        let mut events = self.events.write();
        let event = events.get_mut(&id).ok_or(StoreError::NotFound)?;
        event.status = EventStatus::Voided;
        Ok(())
    }
}
