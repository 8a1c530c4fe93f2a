use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, SqlErr, TransactionTrait,
};
use tracing::debug;

use crate::domain::{
    error::RepositoryError,
    models::user::{Interest, NewUser, Skill, User},
    repositories::user_registration_repository::UserRegistrationRepository,
};
use entity::{interests, skills, user_interests, user_skills, users};

#[derive(Clone)]
pub struct SeaOrmUserRegistrationRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn database_error(e: DbErr) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRegistrationRepository for SeaOrmUserRegistrationRepository {
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(database_error)?;
        Ok(count > 0)
    }

    async fn register_user(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        // Begin transaction, dropping it uncommitted rolls everything back
        let txn = self.db.begin().await.map_err(database_error)?;

        let now = chrono::Utc::now().fixed_offset();
        let profile = new_user.profile();

        // Insert user
        let user_model = users::ActiveModel {
            surname: Set(profile.surname.clone()),
            name: Set(profile.name.clone()),
            patronymic: Set(profile.patronymic.clone()),
            email: Set(profile.email.clone()),
            age: Set(profile.age),
            nationality: Set(profile.nationality.clone()),
            country: Set(profile.country.clone()),
            gender: Set(profile.gender.as_str().to_string()),
            full_name: Set(new_user.full_name().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user_id = users::Entity::insert(user_model)
            .exec(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::DuplicateEmail,
                _ => database_error(e),
            })?
            .last_insert_id;

        // Link interests that exist by exact name
        let mut interests = Vec::new();
        for name in new_user.interest_names() {
            let Some(interest) = interests::Entity::find()
                .filter(interests::Column::Name.eq(name))
                .one(&txn)
                .await
                .map_err(database_error)?
            else {
                debug!(user_id, interest = name, "skipping unknown interest");
                continue;
            };

            let link = user_interests::ActiveModel {
                user_id: Set(user_id),
                interest_id: Set(interest.id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            user_interests::Entity::insert(link)
                .exec(&txn)
                .await
                .map_err(database_error)?;

            interests.push(Interest {
                id: interest.id,
                name: interest.name,
            });
        }

        // Link skills that exist by exact name
        let mut skills = Vec::new();
        for name in new_user.skill_names() {
            let Some(skill) = skills::Entity::find()
                .filter(skills::Column::Name.eq(name))
                .one(&txn)
                .await
                .map_err(database_error)?
            else {
                debug!(user_id, skill = name, "skipping unknown skill");
                continue;
            };

            let link = user_skills::ActiveModel {
                user_id: Set(user_id),
                skill_id: Set(skill.id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            user_skills::Entity::insert(link)
                .exec(&txn)
                .await
                .map_err(database_error)?;

            skills.push(Skill {
                id: skill.id,
                name: skill.name,
            });
        }

        // Commit transaction
        txn.commit().await.map_err(database_error)?;

        // Construct domain model
        let user = User::new(
            user_id,
            profile.clone(),
            new_user.full_name().to_string(),
            now,
            now,
        )
        .with_interests(interests)
        .with_skills(skills);

        Ok(user)
    }
}
