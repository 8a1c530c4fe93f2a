//! Shared fixtures for unit and router tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::{
    domain::{
        error::RepositoryError,
        models::user::{Interest, NewUser, Skill, User},
        repositories::user_registration_repository::UserRegistrationRepository,
    },
    infrastructure::{migration::Migrator, reference_seeder::ReferenceSeeder},
};

/// Fresh in-memory SQLite database with the schema applied.
/// A single pooled connection keeps every query on the same memory database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("Connection to in-memory SQLite failed");
    Migrator::up(&db, None).await.expect("Migrations failed");
    db
}

/// In-memory database seeded with the reference rows used across tests
pub async fn seeded_db() -> DatabaseConnection {
    let db = memory_db().await;
    let seeder = ReferenceSeeder::new(db.clone());
    seeder
        .seed_interests(&["Sports".to_string()])
        .await
        .expect("Seeding interests failed");
    seeder
        .seed_skills(&["Ruby".to_string(), "Rails".to_string()])
        .await
        .expect("Seeding skills failed");
    db
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    interests: Vec<Interest>,
    skills: Vec<Skill>,
}

/// Repository double that keeps users in memory and matches references by exact name
#[derive(Clone, Default)]
pub struct InMemoryRegistrationRepository {
    state: Arc<Mutex<State>>,
    email_checks: Arc<AtomicUsize>,
    raced_email: Option<String>,
    failing: bool,
}

impl InMemoryRegistrationRepository {
    pub fn with_references(interests: &[&str], skills: &[&str]) -> Self {
        let repository = Self::default();
        {
            let mut state = repository.state.lock().unwrap();
            state.interests = interests
                .iter()
                .zip(1..)
                .map(|(name, id)| Interest {
                    id,
                    name: name.to_string(),
                })
                .collect();
            state.skills = skills
                .iter()
                .zip(1..)
                .map(|(name, id)| Skill {
                    id,
                    name: name.to_string(),
                })
                .collect();
        }
        repository
    }

    /// Simulate another request inserting `email` right after the pre-check
    pub fn racing_on(mut self, email: &str) -> Self {
        self.raced_email = Some(email.to_string());
        self
    }

    /// Every write fails like an unreachable database
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn email_checks(&self) -> usize {
        self.email_checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRegistrationRepository for InMemoryRegistrationRepository {
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        self.email_checks.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().any(|user| user.profile().email == email))
    }

    async fn register_user(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        if self.failing {
            return Err(RepositoryError::DatabaseError("connection refused".to_string()));
        }
        if self.raced_email.as_deref() == Some(new_user.email()) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let mut state = self.state.lock().unwrap();
        let interests = new_user
            .interest_names()
            .into_iter()
            .filter_map(|name| state.interests.iter().find(|i| i.name == name).cloned())
            .collect();
        let skills = new_user
            .skill_names()
            .into_iter()
            .filter_map(|name| state.skills.iter().find(|s| s.name == name).cloned())
            .collect();

        let now = Utc::now().fixed_offset();
        let id = i32::try_from(state.users.len() + 1).unwrap();
        let user = User::new(
            id,
            new_user.profile().clone(),
            new_user.full_name().to_string(),
            now,
            now,
        )
        .with_interests(interests)
        .with_skills(skills);
        state.users.push(user.clone());
        Ok(user)
    }
}
