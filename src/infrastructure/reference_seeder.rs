use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use tracing::info;

use crate::domain::{error::RepositoryError, models::user::Timestamp};
use entity::{interests, skills};

/// Inserts reference interests and skills an operator lists in configuration.
///
/// Registration only ever reads these tables, this is how rows get there on
/// a fresh database. Names already present are left untouched.
#[derive(Clone)]
pub struct ReferenceSeeder {
    db: DatabaseConnection,
}

impl ReferenceSeeder {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the number of interests inserted
    pub async fn seed_interests(&self, names: &[String]) -> Result<usize, RepositoryError> {
        self.seed::<interests::Entity, _>("interests", names, interests::Column::Name, |name, now| {
            interests::ActiveModel {
                name: Set(name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
        })
        .await
    }

    /// Returns the number of skills inserted
    pub async fn seed_skills(&self, names: &[String]) -> Result<usize, RepositoryError> {
        self.seed::<skills::Entity, _>("skills", names, skills::Column::Name, |name, now| {
            skills::ActiveModel {
                name: Set(name),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
        })
        .await
    }

    async fn seed<E, A>(
        &self,
        table: &'static str,
        names: &[String],
        name_column: E::Column,
        row: impl Fn(String, Timestamp) -> A,
    ) -> Result<usize, RepositoryError>
    where
        E: EntityTrait,
        A: ActiveModelTrait<Entity = E> + Send,
    {
        let mut inserted = 0;
        for name in names {
            let existing = E::find()
                .filter(name_column.eq(name.as_str()))
                .one(&self.db)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
            if existing.is_some() {
                continue;
            }

            let now = chrono::Utc::now().fixed_offset();
            E::insert(row(name.clone(), now))
                .exec(&self.db)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
            inserted += 1;
        }
        if inserted > 0 {
            info!(table, inserted, "seeded reference rows");
        }
        Ok(inserted)
    }
}
