//! Delegated access grants over shared pets.
//!
//! A pet's owner can invite another user to a subset of capabilities
//! ([`Scope`]s) over one pet. The invitation becomes effective only once the
//! grantee accepts it, and the owner can revoke it at any time. This crate
//! owns the grant lifecycle state machine, the scope catalog and the grant
//! store contract; the decision predicate built on top of it lives in the
//! `authz` module.

pub mod domain;
pub mod infra;

pub use domain::error::DomainError;
pub use domain::model::{Grant, GrantStatus};
pub use domain::repo::{GrantRepository, StoreError};
pub use domain::scope::{Scope, ScopeParseError, ScopeSet};
pub use domain::service::{
    GrantOutcome, GrantService, GrantServiceConfig, InviteRequest, RepairFailure,
};
pub use infra::storage::memory::InMemoryGrantRepository;
