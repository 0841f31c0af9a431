//! In-memory reference implementation of the grant store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::model::{Grant, GrantStatus};
use crate::domain::repo::{GrantRepository, StoreError};

/// Grant store backed by a keyed map behind one lock per store instance, so
/// multiple stores can coexist (notably in tests). The lock serializes writes
/// against full-set reads, which is the minimal discipline the lifecycle
/// engine's dedup passes rely on.
#[derive(Debug, Default)]
pub struct InMemoryGrantRepository {
    grants: RwLock<HashMap<Uuid, Grant>>,
}

impl InMemoryGrantRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GrantRepository for InMemoryGrantRepository {
    async fn create(&self, grant: Grant) -> Result<(), StoreError> {
        let mut grants = self.grants.write();
        if grants.contains_key(&grant.id) {
            return Err(StoreError::AlreadyExists);
        }
        grants.insert(grant.id, grant);
        Ok(())
    }

    async fn update(&self, grant: Grant) -> Result<(), StoreError> {
        let mut grants = self.grants.write();
        if !grants.contains_key(&grant.id) {
            return Err(StoreError::NotFound);
        }
        grants.insert(grant.id, grant);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Grant, StoreError> {
        self.grants
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_by_pet(&self, pet_id: Uuid) -> Result<Vec<Grant>, StoreError> {
        Ok(self
            .grants
            .read()
            .values()
            .filter(|g| g.pet_id == pet_id)
            .cloned()
            .collect())
    }

    async fn list_by_grantee(&self, grantee_user_id: Uuid) -> Result<Vec<Grant>, StoreError> {
        Ok(self
            .grants
            .read()
            .values()
            .filter(|g| g.grantee_user_id == grantee_user_id)
            .cloned()
            .collect())
    }

    async fn get_active_grant(
        &self,
        pet_id: Uuid,
        grantee_user_id: Uuid,
    ) -> Result<Grant, StoreError> {
        // Winner among duplicate actives is decided by the recency key, not
        // by map iteration order.
        self.grants
            .read()
            .values()
            .filter(|g| {
                g.pet_id == pet_id
                    && g.grantee_user_id == grantee_user_id
                    && g.status == GrantStatus::Active
            })
            .max_by_key(|g| g.recency_key())
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::domain::scope::Scope;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 22, 10, 0, 0).unwrap()
    }

    fn grant(pet: Uuid, grantee: Uuid, status: GrantStatus) -> Grant {
        Grant {
            id: Uuid::new_v4(),
            pet_id: pet,
            owner_user_id: Uuid::new_v4(),
            grantee_user_id: grantee,
            scopes: [Scope::PetRead].into_iter().collect(),
            status,
            created_at: t0(),
            updated_at: t0(),
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let repo = InMemoryGrantRepository::new();
        let g = grant(Uuid::new_v4(), Uuid::new_v4(), GrantStatus::Invited);
        repo.create(g.clone()).await.unwrap();
        assert_eq!(repo.create(g).await.unwrap_err(), StoreError::AlreadyExists);
    }

    #[tokio::test]
    async fn update_requires_existing_grant() {
        let repo = InMemoryGrantRepository::new();
        let g = grant(Uuid::new_v4(), Uuid::new_v4(), GrantStatus::Invited);
        assert_eq!(repo.update(g).await.unwrap_err(), StoreError::NotFound);
    }

    #[tokio::test]
    async fn get_active_grant_ignores_invited_and_revoked() {
        let repo = InMemoryGrantRepository::new();
        let pet = Uuid::new_v4();
        let grantee = Uuid::new_v4();
        repo.create(grant(pet, grantee, GrantStatus::Invited))
            .await
            .unwrap();
        repo.create(grant(pet, grantee, GrantStatus::Revoked))
            .await
            .unwrap();

        assert_eq!(
            repo.get_active_grant(pet, grantee).await.unwrap_err(),
            StoreError::NotFound
        );
    }

    #[tokio::test]
    async fn active_lookup_is_scoped_to_the_pair() {
        let repo = InMemoryGrantRepository::new();
        let pet = Uuid::new_v4();
        let grantee = Uuid::new_v4();
        repo.create(grant(pet, grantee, GrantStatus::Active))
            .await
            .unwrap();
        repo.create(grant(Uuid::new_v4(), grantee, GrantStatus::Active))
            .await
            .unwrap();
        repo.create(grant(pet, Uuid::new_v4(), GrantStatus::Active))
            .await
            .unwrap();

        let found = repo.get_active_grant(pet, grantee).await.unwrap();
        assert_eq!(found.pet_id, pet);
        assert_eq!(found.grantee_user_id, grantee);
    }

    #[tokio::test]
    async fn duplicate_actives_resolve_to_most_recently_updated() {
        let repo = InMemoryGrantRepository::new();
        let pet = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        let older = grant(pet, grantee, GrantStatus::Active);
        let mut newer = grant(pet, grantee, GrantStatus::Active);
        newer.updated_at = t0() + Duration::seconds(5);
        repo.create(newer.clone()).await.unwrap();
        repo.create(older).await.unwrap();

        assert_eq!(repo.get_active_grant(pet, grantee).await.unwrap().id, newer.id);
    }

    #[tokio::test]
    async fn updated_at_ties_break_on_created_at() {
        let repo = InMemoryGrantRepository::new();
        let pet = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        let older = grant(pet, grantee, GrantStatus::Active);
        let mut newer = grant(pet, grantee, GrantStatus::Active);
        newer.created_at = t0() + Duration::seconds(5);
        repo.create(older).await.unwrap();
        repo.create(newer.clone()).await.unwrap();

        assert_eq!(repo.get_active_grant(pet, grantee).await.unwrap().id, newer.id);
    }

    #[tokio::test]
    async fn full_ties_break_on_grant_id() {
        let repo = InMemoryGrantRepository::new();
        let pet = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        let a = grant(pet, grantee, GrantStatus::Active);
        let b = grant(pet, grantee, GrantStatus::Active);
        let expected = a.id.max(b.id);
        repo.create(a).await.unwrap();
        repo.create(b).await.unwrap();

        // Same timestamps on both: the id decides, deterministically.
        assert_eq!(repo.get_active_grant(pet, grantee).await.unwrap().id, expected);
        assert_eq!(repo.get_active_grant(pet, grantee).await.unwrap().id, expected);
    }

    #[tokio::test]
    async fn listings_cover_every_status() {
        let repo = InMemoryGrantRepository::new();
        let pet = Uuid::new_v4();
        let grantee = Uuid::new_v4();
        repo.create(grant(pet, grantee, GrantStatus::Invited))
            .await
            .unwrap();
        repo.create(grant(pet, grantee, GrantStatus::Revoked))
            .await
            .unwrap();
        repo.create(grant(pet, Uuid::new_v4(), GrantStatus::Active))
            .await
            .unwrap();

        assert_eq!(repo.list_by_pet(pet).await.unwrap().len(), 3);
        assert_eq!(repo.list_by_grantee(grantee).await.unwrap().len(), 2);
    }
}
