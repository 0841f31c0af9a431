use std::sync::Arc;

use access_grants::{DomainError, GrantRepository, GrantService, Scope};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Outcome of an authorization check.
///
/// Denials are uniform: the decision never distinguishes "no grant exists"
/// from "the grant lacks this scope", so a denied caller learns nothing about
/// grant existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    #[error("pet not found")]
    PetNotFound,
}

/// Resolves the owning user of a pet.
///
/// Implemented by the pet-management module; declared here, on the consumer
/// side, to keep the pets and grants modules from depending on each other.
#[async_trait]
pub trait PetOwnerLookup: Send + Sync {
    async fn owner_of(&self, pet_id: Uuid) -> Result<Uuid, OwnershipError>;
}

/// The authorization predicate consumed by every resource endpoint.
///
/// Stateless: each call reads the grant store afresh, so a revocation is
/// visible on the very next check.
pub struct Authorizer<R> {
    grants: Arc<GrantService<R>>,
    pet_owners: Arc<dyn PetOwnerLookup>,
}

impl<R: GrantRepository> Authorizer<R> {
    pub fn new(grants: Arc<GrantService<R>>, pet_owners: Arc<dyn PetOwnerLookup>) -> Self {
        Self { grants, pet_owners }
    }

    /// May `caller_id` perform the action requiring `required_scope` on
    /// `pet_id`, whose owner is already known to be `pet_owner_id`?
    ///
    /// Owners are never scope-constrained on their own pets. Anyone else
    /// needs an active grant carrying the required scope.
    pub async fn authorize(
        &self,
        caller_id: Uuid,
        pet_owner_id: Uuid,
        pet_id: Uuid,
        required_scope: Scope,
    ) -> Decision {
        if caller_id == pet_owner_id {
            return Decision::Allow;
        }

        match self.grants.get_active_grant(pet_id, caller_id).await {
            Ok(grant) if grant.has_scope(required_scope) => Decision::Allow,
            Ok(_) | Err(DomainError::NotFound) => Decision::Deny,
            Err(error) => {
                // Infrastructure trouble reads as a denial to the caller, but
                // is worth an operator's attention.
                tracing::warn!(%pet_id, %error, "active-grant lookup failed, denying");
                Decision::Deny
            }
        }
    }

    /// Resolves the pet's owner first, then applies [`Authorizer::authorize`].
    ///
    /// A failed ownership lookup is "pet not found", which the resource layer
    /// surfaces as such rather than as a denial.
    pub async fn authorize_action(
        &self,
        caller_id: Uuid,
        pet_id: Uuid,
        required_scope: Scope,
    ) -> Result<Decision, OwnershipError> {
        let owner_id = self.pet_owners.owner_of(pet_id).await?;
        Ok(self
            .authorize(caller_id, owner_id, pet_id, required_scope)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use access_grants::{GrantServiceConfig, InMemoryGrantRepository, InviteRequest};

    use super::*;

    struct NoPets;

    #[async_trait]
    impl PetOwnerLookup for NoPets {
        async fn owner_of(&self, _pet_id: Uuid) -> Result<Uuid, OwnershipError> {
            Err(OwnershipError::PetNotFound)
        }
    }

    fn authorizer() -> (
        Arc<GrantService<InMemoryGrantRepository>>,
        Authorizer<InMemoryGrantRepository>,
    ) {
        let repo = Arc::new(InMemoryGrantRepository::new());
        let grants = Arc::new(GrantService::new(repo, GrantServiceConfig::default()));
        let authorizer = Authorizer::new(Arc::clone(&grants), Arc::new(NoPets));
        (grants, authorizer)
    }

    #[tokio::test]
    async fn owner_bypass_holds_with_zero_grants() {
        let (_, authz) = authorizer();
        let owner = Uuid::new_v4();
        let pet = Uuid::new_v4();

        for scope in Scope::ALL {
            assert!(authz.authorize(owner, owner, pet, scope).await.is_allowed());
        }
    }

    #[tokio::test]
    async fn stranger_without_grant_is_denied() {
        let (_, authz) = authorizer();
        let decision = authz
            .authorize(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Scope::PetRead)
            .await;
        assert_eq!(decision, Decision::Deny);
    }

    #[tokio::test]
    async fn active_grant_allows_only_its_scopes() {
        let (grants, authz) = authorizer();
        let (pet, owner, delegate) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let g = grants
            .invite(InviteRequest {
                pet_id: pet,
                owner_user_id: owner,
                grantee_user_id: delegate,
                scopes: vec!["events:read".to_owned()],
            })
            .await
            .unwrap()
            .into_grant();
        grants.accept(g.id, delegate).await.unwrap();

        assert!(authz
            .authorize(delegate, owner, pet, Scope::EventsRead)
            .await
            .is_allowed());
        assert_eq!(
            authz.authorize(delegate, owner, pet, Scope::EventsCreate).await,
            Decision::Deny
        );
    }

    #[tokio::test]
    async fn missing_pet_surfaces_as_ownership_error() {
        let (_, authz) = authorizer();
        let err = authz
            .authorize_action(Uuid::new_v4(), Uuid::new_v4(), Scope::PetRead)
            .await
            .unwrap_err();
        assert_eq!(err, OwnershipError::PetNotFound);
    }
}
