//! Grant records and their lifecycle states.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scope::{Scope, ScopeSet};

/// Lifecycle state of a delegated access grant.
///
/// `invited -> active -> revoked`, with revocation also possible straight
/// from `invited`. `revoked` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantStatus {
    Invited,
    Active,
    Revoked,
}

impl GrantStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GrantStatus::Invited => "invited",
            GrantStatus::Active => "active",
            GrantStatus::Revoked => "revoked",
        }
    }
}

impl fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delegation of a subset of scopes, for one pet, from its owner to a
/// grantee.
///
/// Grants are never deleted; revocation is a status change that preserves
/// history. `revoked_at` is set if and only if the status is
/// [`GrantStatus::Revoked`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub id: Uuid,
    pub pet_id: Uuid,

    /// The user sharing the pet.
    pub owner_user_id: Uuid,
    /// The delegate receiving access.
    pub grantee_user_id: Uuid,

    pub scopes: ScopeSet,
    pub status: GrantStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Grant {
    /// Whether this grant carries the given scope.
    #[must_use]
    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scopes.contains(scope)
    }

    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.status == GrantStatus::Revoked
    }

    /// Deterministic recency ordering: `updated_at`, then `created_at`, then
    /// the grant id. Every store implementation must pick the winner among
    /// duplicate active grants by the maximum of this key, and the lifecycle
    /// engine uses the same key when deciding which duplicate survives a
    /// cleanup pass.
    #[must_use]
    pub fn recency_key(&self) -> (DateTime<Utc>, DateTime<Utc>, Uuid) {
        (self.updated_at, self.created_at, self.id)
    }
}
