//! Authorization decisions for protected pet resources.
//!
//! Resource handlers ask one question here: may this caller perform the
//! action requiring scope S on pet P? The answer is the pet owner's
//! unconditional yes, or an active-grant scope check. Decisions are computed
//! fresh on every call so that revocation takes effect immediately.

pub mod predicate;

pub use predicate::{Authorizer, Decision, OwnershipError, PetOwnerLookup};
