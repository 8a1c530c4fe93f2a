pub mod interests;
pub mod skills;
pub mod user_interests;
pub mod user_skills;
pub mod users;
