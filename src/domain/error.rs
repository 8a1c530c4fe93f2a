use thiserror::Error;

use crate::domain::validation::{ALREADY_EXISTS, Field, ValidationErrors};

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

impl DomainError {
    /// Field error reported when the email belongs to an existing user
    pub fn email_taken() -> Self {
        Self::Validation(ValidationErrors::single(Field::Email, ALREADY_EXISTS))
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
