pub mod database;
pub mod migration;
pub mod reference_seeder;
pub mod user_registration_repository;
