use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub type UserId = i32;
pub type Timestamp = DateTime<FixedOffset>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Case-sensitive, only the exact lowercase spellings are accepted
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Interest reference row attached to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: i32,
    pub name: String,
}

/// Skill reference row attached to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i32,
    pub name: String,
}

/// Validated personal attributes of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub email: String,
    pub age: i32,
    pub nationality: String,
    pub country: String,
    pub gender: Gender,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.surname, self.name, self.patronymic)
    }
}

/// Normalized registration command, produced only by validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    profile: UserProfile,
    full_name: String,
    interests: Vec<String>,
    skills: String,
}

impl NewUser {
    pub fn new(profile: UserProfile, interests: Vec<String>, skills: String) -> Self {
        let full_name = profile.full_name();
        Self {
            profile,
            full_name,
            interests,
            skills,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
    pub fn email(&self) -> &str {
        &self.profile.email
    }
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Interest names to look up, in the order supplied.
    pub fn interest_names(&self) -> Vec<&str> {
        self.interests.iter().map(String::as_str).collect()
    }

    /// Skill names from the comma separated field.
    /// Tokens are trimmed and empty ones dropped.
    pub fn skill_names(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    profile: UserProfile,
    full_name: String,
    interests: Vec<Interest>,
    skills: Vec<Skill>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    pub fn new(
        id: UserId,
        profile: UserProfile,
        full_name: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            profile,
            full_name,
            interests: Vec::new(),
            skills: Vec::new(),
            created_at,
            updated_at,
        }
    }

    pub fn with_interests(mut self, interests: Vec<Interest>) -> Self {
        self.interests = interests;
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    // getters only
    pub fn id(&self) -> UserId {
        self.id
    }
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            surname: "Smith".to_string(),
            name: "John".to_string(),
            patronymic: "Doe".to_string(),
            email: "john.smith@example.com".to_string(),
            age: 30,
            nationality: "American".to_string(),
            country: "USA".to_string(),
            gender: Gender::Male,
        }
    }

    #[test]
    fn full_name_joins_surname_name_and_patronymic() {
        let new_user = NewUser::new(profile(), Vec::new(), String::new());
        assert_eq!(new_user.full_name(), "Smith John Doe");
    }

    #[rstest]
    #[case("Ruby, Rails", vec!["Ruby", "Rails"])]
    #[case("", vec![])]
    #[case(" , Ruby,,Ruby ,", vec!["Ruby", "Ruby"])]
    #[case("  Rust  ", vec!["Rust"])]
    fn skill_names_are_split_and_trimmed(
        #[case] skills: &str,
        #[case] expected: Vec<&str>,
    ) {
        let new_user = NewUser::new(profile(), Vec::new(), skills.to_string());
        assert_eq!(new_user.skill_names(), expected);
    }

    #[test]
    fn interest_names_keep_exact_spelling() {
        let interests = vec![
            "Sports".to_string(),
            " Sports".to_string(),
            "Sports".to_string(),
        ];
        let new_user = NewUser::new(profile(), interests, String::new());
        assert_eq!(new_user.interest_names(), vec!["Sports", " Sports", "Sports"]);
    }

    #[rstest]
    #[case("male", Some(Gender::Male))]
    #[case("female", Some(Gender::Female))]
    #[case("Male", None)]
    #[case("other", None)]
    fn gender_parse_is_case_sensitive(#[case] value: &str, #[case] expected: Option<Gender>) {
        assert_eq!(Gender::parse(value), expected);
    }
}
