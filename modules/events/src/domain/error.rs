use thiserror::Error;

use super::repo::StoreError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("event not found")]
    NotFound,

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
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists | StoreError::Backend(_) => Self::Storage {
                message: e.to_string(),
            },
        }
    }
}
