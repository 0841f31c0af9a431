use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

use super::error::DomainError;
use super::model::{Grant, GrantStatus};
use super::repo::{GrantRepository, StoreError};
use super::scope::{Scope, ScopeSet};

/// Tunable policy for the grant lifecycle engine.
#[derive(Debug, Clone)]
pub struct GrantServiceConfig {
    /// Scopes applied when an invite carries an empty scope list.
    pub default_scopes: ScopeSet,
}

impl Default for GrantServiceConfig {
    fn default() -> Self {
        Self {
            // Smallest set that lets a delegate usefully view a shared pet.
            default_scopes: [Scope::PetRead, Scope::EventsRead].into_iter().collect(),
        }
    }
}

/// An owner's request to invite a delegate to one pet.
///
/// Scopes arrive as raw strings from the caller and are validated against the
/// catalog, all-or-nothing.
#[derive(Debug, Clone)]
pub struct InviteRequest {
    pub pet_id: Uuid,
    pub owner_user_id: Uuid,
    pub grantee_user_id: Uuid,
    pub scopes: Vec<String>,
}

/// A duplicate-cleanup write that did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairFailure {
    pub grant_id: Uuid,
    pub error: StoreError,
}

/// Primary result of an invite or accept, plus the advisory outcome of any
/// duplicate-cleanup pass performed alongside it. Repair failures never fail
/// the primary operation; they are reported here and logged.
#[derive(Debug)]
pub struct GrantOutcome {
    pub grant: Grant,
    pub repair_failures: Vec<RepairFailure>,
}

impl GrantOutcome {
    #[must_use]
    pub fn into_grant(self) -> Grant {
        self.grant
    }
}

/// The grant lifecycle engine.
///
/// Owns the invite/accept/revoke state machine, scope validation and the
/// central consistency invariant: at most one grant with status `active`
/// exists for a given (pet, grantee) pair. Invite-time dedup and the
/// accept-time repair pass converge to that invariant even when concurrent
/// invites slip past each other.
pub struct GrantService<R> {
    repo: Arc<R>,
    config: GrantServiceConfig,
    now: fn() -> DateTime<Utc>,
}

impl<R: GrantRepository> GrantService<R> {
    pub fn new(repo: Arc<R>, config: GrantServiceConfig) -> Self {
        Self {
            repo,
            config,
            now: Utc::now,
        }
    }

    /// Same as [`GrantService::new`] but with a pinned clock.
    #[cfg(test)]
    pub(crate) fn with_clock(
        repo: Arc<R>,
        config: GrantServiceConfig,
        now: fn() -> DateTime<Utc>,
    ) -> Self {
        Self { repo, config, now }
    }

    /// Invites `grantee_user_id` to the pet, or refreshes the existing
    /// invitation.
    ///
    /// If a non-revoked grant already exists for the (pet, owner, grantee)
    /// triple this is a re-invite: the same grant is returned with its scope
    /// set replaced by the newly resolved one. A revoked match is never
    /// resurrected; re-inviting after revocation starts a fresh grant in
    /// `invited` status.
    #[instrument(
        skip(self, req),
        fields(pet_id = %req.pet_id, grantee_user_id = %req.grantee_user_id)
    )]
    pub async fn invite(&self, req: InviteRequest) -> Result<GrantOutcome, DomainError> {
        ensure_id("pet_id", req.pet_id)?;
        ensure_id("owner_user_id", req.owner_user_id)?;
        ensure_id("grantee_user_id", req.grantee_user_id)?;
        if req.owner_user_id == req.grantee_user_id {
            return Err(DomainError::validation(
                "grantee_user_id",
                "owner cannot be their own delegate",
            ));
        }

        let scopes = self.resolve_scopes(&req.scopes)?;
        let now = (self.now)();

        // Re-invite path: reuse the most recent non-revoked grant for this
        // exact triple and clean up any older duplicates.
        let mut matches: Vec<Grant> = self
            .repo
            .list_by_pet(req.pet_id)
            .await?
            .into_iter()
            .filter(|g| {
                g.owner_user_id == req.owner_user_id
                    && g.grantee_user_id == req.grantee_user_id
                    && !g.is_revoked()
            })
            .collect();
        matches.sort_by_key(Grant::recency_key);

        if let Some(mut grant) = matches.pop() {
            let repair_failures = self.revoke_stale(matches, now).await;
            grant.scopes = scopes;
            grant.updated_at = now;
            self.repo.update(grant.clone()).await?;
            tracing::debug!(grant_id = %grant.id, "re-invite refreshed existing grant");
            return Ok(GrantOutcome {
                grant,
                repair_failures,
            });
        }

        let grant = Grant {
            id: Uuid::new_v4(),
            pet_id: req.pet_id,
            owner_user_id: req.owner_user_id,
            grantee_user_id: req.grantee_user_id,
            scopes,
            status: GrantStatus::Invited,
            created_at: now,
            updated_at: now,
            revoked_at: None,
        };
        self.repo.create(grant.clone()).await?;
        tracing::debug!(grant_id = %grant.id, "delegate invited");
        Ok(GrantOutcome {
            grant,
            repair_failures: Vec::new(),
        })
    }

    /// Accepts an invitation on behalf of its grantee.
    ///
    /// Idempotent when the grant is already active. A revoked grant is
    /// terminal and fails with `BadState`. After activating (or confirming)
    /// the grant, every other non-revoked grant for the same (pet, grantee)
    /// pair is revoked best-effort so the single-active-grant invariant holds
    /// even if invite-time dedup missed a duplicate.
    #[instrument(skip(self), fields(grant_id = %grant_id))]
    pub async fn accept(
        &self,
        grant_id: Uuid,
        grantee_user_id: Uuid,
    ) -> Result<GrantOutcome, DomainError> {
        ensure_id("grant_id", grant_id)?;
        ensure_id("grantee_user_id", grantee_user_id)?;

        let mut grant = self.repo.get_by_id(grant_id).await?;
        if grant.grantee_user_id != grantee_user_id {
            return Err(DomainError::Forbidden);
        }

        let now = (self.now)();
        match grant.status {
            GrantStatus::Revoked => Err(DomainError::bad_state(grant.status)),
            GrantStatus::Active => {
                let repair_failures = self.repair_active_pair(&grant, now).await;
                Ok(GrantOutcome {
                    grant,
                    repair_failures,
                })
            }
            GrantStatus::Invited => {
                grant.status = GrantStatus::Active;
                grant.updated_at = now;
                self.repo.update(grant.clone()).await?;
                tracing::debug!("invitation accepted");
                let repair_failures = self.repair_active_pair(&grant, now).await;
                Ok(GrantOutcome {
                    grant,
                    repair_failures,
                })
            }
        }
    }

    /// Revokes a grant on behalf of its owner. Idempotent when the grant is
    /// already revoked; the grantee cannot revoke their own grant.
    ///
    /// Takes effect on the very next authorization check: there is no
    /// decision cache anywhere downstream.
    #[instrument(skip(self), fields(grant_id = %grant_id))]
    pub async fn revoke(&self, grant_id: Uuid, owner_user_id: Uuid) -> Result<Grant, DomainError> {
        ensure_id("grant_id", grant_id)?;
        ensure_id("owner_user_id", owner_user_id)?;

        let mut grant = self.repo.get_by_id(grant_id).await?;
        if grant.owner_user_id != owner_user_id {
            return Err(DomainError::Forbidden);
        }
        if grant.is_revoked() {
            return Ok(grant);
        }

        let now = (self.now)();
        grant.status = GrantStatus::Revoked;
        grant.updated_at = now;
        grant.revoked_at = Some(now);
        self.repo.update(grant.clone()).await?;
        tracing::debug!("grant revoked");
        Ok(grant)
    }

    /// The single active grant for the (pet, grantee) pair, if any.
    pub async fn get_active_grant(
        &self,
        pet_id: Uuid,
        grantee_user_id: Uuid,
    ) -> Result<Grant, DomainError> {
        ensure_id("pet_id", pet_id)?;
        ensure_id("grantee_user_id", grantee_user_id)?;
        Ok(self.repo.get_active_grant(pet_id, grantee_user_id).await?)
    }

    pub async fn list_by_pet(&self, pet_id: Uuid) -> Result<Vec<Grant>, DomainError> {
        ensure_id("pet_id", pet_id)?;
        Ok(self.repo.list_by_pet(pet_id).await?)
    }

    pub async fn list_by_grantee(&self, grantee_user_id: Uuid) -> Result<Vec<Grant>, DomainError> {
        ensure_id("grantee_user_id", grantee_user_id)?;
        Ok(self.repo.list_by_grantee(grantee_user_id).await?)
    }

    fn resolve_scopes(&self, raw: &[String]) -> Result<ScopeSet, DomainError> {
        let scopes = ScopeSet::parse_strict(raw)?;
        if scopes.is_empty() {
            Ok(self.config.default_scopes.clone())
        } else {
            Ok(scopes)
        }
    }

    /// Revokes every other non-revoked grant for `kept`'s (pet, grantee)
    /// pair. Fully best-effort: the primary accept must not fail because a
    /// repair write, or even the duplicate listing, did not go through.
    async fn repair_active_pair(&self, kept: &Grant, now: DateTime<Utc>) -> Vec<RepairFailure> {
        let listed = match self.repo.list_by_pet(kept.pet_id).await {
            Ok(listed) => listed,
            Err(error) => {
                tracing::warn!(%error, "skipping duplicate-grant repair: listing failed");
                return Vec::new();
            }
        };
        let stale: Vec<Grant> = listed
            .into_iter()
            .filter(|g| {
                g.id != kept.id && g.grantee_user_id == kept.grantee_user_id && !g.is_revoked()
            })
            .collect();
        self.revoke_stale(stale, now).await
    }

    /// Best-effort revocation of stale duplicates. Never fails the caller.
    async fn revoke_stale(&self, stale: Vec<Grant>, now: DateTime<Utc>) -> Vec<RepairFailure> {
        let mut failures = Vec::new();
        for mut grant in stale {
            grant.status = GrantStatus::Revoked;
            grant.updated_at = now;
            grant.revoked_at = Some(now);
            let grant_id = grant.id;
            if let Err(error) = self.repo.update(grant).await {
                tracing::warn!(%grant_id, %error, "failed to revoke stale duplicate grant");
                failures.push(RepairFailure { grant_id, error });
            }
        }
        failures
    }
}

fn ensure_id(field: &'static str, id: Uuid) -> Result<(), DomainError> {
    if id.is_nil() {
        return Err(DomainError::validation(field, "identifier is required"));
    }
    Ok(())
}
