use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{NewUser, User},
};

/// Repository for user registration that writes the user and its join rows atomically
#[async_trait]
pub trait UserRegistrationRepository: Send + Sync {
    /// Exact, case-sensitive lookup of an existing user by email
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError>;

    /// Insert the user, then link it to every interest and skill that exists by name.
    /// Unknown names are skipped. Fails with `DuplicateEmail` when the store
    /// rejects the email as already taken.
    async fn register_user(&self, new_user: &NewUser) -> Result<User, RepositoryError>;
}
