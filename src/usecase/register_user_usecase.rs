use tracing::{info, warn};

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{registration::RegistrationForm, user::User},
    repositories::user_registration_repository::UserRegistrationRepository,
    validation,
};

pub struct RegisterUserUsecase<R: UserRegistrationRepository> {
    registration_repository: R,
}

impl<R: UserRegistrationRepository> RegisterUserUsecase<R> {
    pub fn new(registration_repository: R) -> Self {
        Self {
            registration_repository,
        }
    }

    /// Validate the form, check the email is free, then persist.
    ///
    /// The email check and the insert are two separate statements, so two
    /// concurrent registrations can both pass the check. The loser then hits
    /// the unique index and gets the same field error.
    pub async fn create_user(&self, form: RegistrationForm) -> Result<User, DomainError> {
        let new_user = validation::validate(&form).inspect_err(|errors| {
            warn!(errors = %errors, "registration rejected");
        })?;

        if self
            .registration_repository
            .email_exists(new_user.email())
            .await?
        {
            warn!("registration rejected: email already exists");
            return Err(DomainError::email_taken());
        }

        match self.registration_repository.register_user(&new_user).await {
            Ok(user) => {
                info!(
                    user_id = user.id(),
                    interests = user.interests().len(),
                    skills = user.skills().len(),
                    "user registered"
                );
                Ok(user)
            }
            Err(RepositoryError::DuplicateEmail) => {
                warn!("registration rejected: email taken by a concurrent request");
                Err(DomainError::email_taken())
            }
            Err(e) => Err(e.into()),
        }
    }
}
