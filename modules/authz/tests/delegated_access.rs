//! End-to-end delegation flows across pets, grants and the predicate,
//! exercising the crates the way a resource layer would.

use std::sync::Arc;

use access_grants::{
    GrantService, GrantServiceConfig, InMemoryGrantRepository, InviteRequest, Scope,
};
use authz::{Authorizer, Decision, OwnershipError, PetOwnerLookup};
use chrono::Utc;
use events::{
    Actor, ActorKind, EventKind, EventService, InMemoryEventRepository, ListFilter, NewEvent,
};
use pets::{InMemoryPetRepository, NewPet, PetService};
use uuid::Uuid;

struct World {
    pets: Arc<PetService<InMemoryPetRepository>>,
    grants: Arc<GrantService<InMemoryGrantRepository>>,
    authz: Authorizer<InMemoryGrantRepository>,
}

fn world() -> World {
    let pets = Arc::new(PetService::new(Arc::new(InMemoryPetRepository::new())));
    let grants = Arc::new(GrantService::new(
        Arc::new(InMemoryGrantRepository::new()),
        GrantServiceConfig::default(),
    ));
    let authz = Authorizer::new(
        Arc::clone(&grants),
        Arc::clone(&pets) as Arc<dyn PetOwnerLookup>,
    );
    World {
        pets,
        grants,
        authz,
    }
}

fn invite(pet: Uuid, owner: Uuid, grantee: Uuid, scopes: &[&str]) -> InviteRequest {
    InviteRequest {
        pet_id: pet,
        owner_user_id: owner,
        grantee_user_id: grantee,
        scopes: scopes.iter().map(|s| (*s).to_owned()).collect(),
    }
}

async fn register_pet(w: &World, owner: Uuid) -> Uuid {
    w.pets
        .create(
            owner,
            NewPet {
                name: "Rocky".to_owned(),
                species: "dog".to_owned(),
                ..NewPet::default()
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn owner_bypass_needs_no_grants() {
    let w = world();
    let owner = Uuid::new_v4();
    let pet = register_pet(&w, owner).await;

    for scope in Scope::ALL {
        let decision = w.authz.authorize_action(owner, pet, scope).await.unwrap();
        assert!(decision.is_allowed());
    }
}

#[tokio::test]
async fn delegation_takes_effect_on_accept_and_dies_on_revoke() {
    let w = world();
    let (owner, delegate) = (Uuid::new_v4(), Uuid::new_v4());
    let pet = register_pet(&w, owner).await;

    let grant = w
        .grants
        .invite(invite(
            pet,
            owner,
            delegate,
            &["pet:read", "events:read", "events:create"],
        ))
        .await
        .unwrap()
        .into_grant();

    // Invited but not yet accepted: no access.
    assert_eq!(
        w.authz.authorize_action(delegate, pet, Scope::PetRead).await.unwrap(),
        Decision::Deny
    );

    w.grants.accept(grant.id, delegate).await.unwrap();
    assert!(w
        .authz
        .authorize_action(delegate, pet, Scope::PetRead)
        .await
        .unwrap()
        .is_allowed());

    // Revocation is visible on the very next check.
    w.grants.revoke(grant.id, owner).await.unwrap();
    assert_eq!(
        w.authz.authorize_action(delegate, pet, Scope::PetRead).await.unwrap(),
        Decision::Deny
    );
}

#[tokio::test]
async fn read_only_delegation_cannot_create_events() {
    let w = world();
    let (owner, delegate) = (Uuid::new_v4(), Uuid::new_v4());
    let pet = register_pet(&w, owner).await;

    let grant = w
        .grants
        .invite(invite(pet, owner, delegate, &["events:read"]))
        .await
        .unwrap()
        .into_grant();
    w.grants.accept(grant.id, delegate).await.unwrap();

    assert!(w
        .authz
        .authorize_action(delegate, pet, Scope::EventsRead)
        .await
        .unwrap()
        .is_allowed());
    assert_eq!(
        w.authz
            .authorize_action(delegate, pet, Scope::EventsCreate)
            .await
            .unwrap(),
        Decision::Deny
    );
}

#[tokio::test]
async fn unknown_pet_is_reported_as_missing_not_denied() {
    let w = world();
    let err = w
        .authz
        .authorize_action(Uuid::new_v4(), Uuid::new_v4(), Scope::PetRead)
        .await
        .unwrap_err();
    assert_eq!(err, OwnershipError::PetNotFound);
}

#[tokio::test]
async fn authorized_delegate_writes_to_the_timeline() {
    let w = world();
    let timeline = EventService::new(Arc::new(InMemoryEventRepository::new()));
    let (owner, delegate) = (Uuid::new_v4(), Uuid::new_v4());
    let pet = register_pet(&w, owner).await;

    let grant = w
        .grants
        .invite(invite(pet, owner, delegate, &["events:read", "events:create"]))
        .await
        .unwrap()
        .into_grant();
    w.grants.accept(grant.id, delegate).await.unwrap();

    // The resource layer's gate, then the domain write.
    let decision = w
        .authz
        .authorize_action(delegate, pet, Scope::EventsCreate)
        .await
        .unwrap();
    assert!(decision.is_allowed());

    timeline
        .create(
            pet,
            Actor {
                kind: ActorKind::DelegateUser,
                id: delegate,
            },
            NewEvent {
                kind: EventKind::WeightRecorded,
                occurred_at: Utc::now(),
                title: "weigh-in".to_owned(),
                notes: "12.4 kg".to_owned(),
                source: None,
                visibility: None,
            },
        )
        .await
        .unwrap();

    let listed = timeline.list_by_pet(pet, ListFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].actor.kind, ActorKind::DelegateUser);
}
