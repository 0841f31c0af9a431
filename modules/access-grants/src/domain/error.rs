use thiserror::Error;

use super::model::GrantStatus;
use super::repo::StoreError;
use super::scope::ScopeParseError;

/// Domain errors for grant lifecycle operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed, missing or disallowed caller-supplied data.
    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    /// The caller lacks rights over this specific grant.
    #[error("access forbidden")]
    Forbidden,

    /// No such grant.
    #[error("grant not found")]
    NotFound,

    /// The request is valid but not allowed from the grant's current state.
    #[error("operation not allowed on a grant in status '{status}'")]
    BadState { status: GrantStatus },

    #[error("storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bad_state(status: GrantStatus) -> Self {
        Self::BadState { status }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists | StoreError::Backend(_) => Self::storage(e.to_string()),
        }
    }
}

impl From<ScopeParseError> for DomainError {
    fn from(e: ScopeParseError) -> Self {
        Self::validation("scopes", e.to_string())
    }
}
