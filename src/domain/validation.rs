use std::fmt;

use serde_json::Value;

use crate::domain::models::{
    registration::RegistrationForm,
    user::{Gender, NewUser, UserProfile},
};

pub const REQUIRED: &str = "is required";
pub const BLANK: &str = "can't be blank";
pub const INVALID_STRING: &str = "is not a valid string";
pub const INVALID_INTEGER: &str = "is not a valid integer";
pub const INVALID_ARRAY: &str = "is not a valid array";
pub const INVALID_NESTED: &str = "has an invalid nested value";
pub const NOT_GREATER_THAN_ZERO: &str = "must be greater than 0";
pub const ABOVE_MAX_AGE: &str = "must be less than or equal to 90";
pub const NOT_INCLUDED: &str = "is not included in the list";
pub const ALREADY_EXISTS: &str = "already exists";

pub const MAX_AGE: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Surname,
    Name,
    Patronymic,
    Email,
    Age,
    Nationality,
    Country,
    Gender,
    Interests,
    Skills,
}

impl Field {
    /// Capitalized attribute name used as the message prefix
    pub fn human_name(&self) -> &'static str {
        match self {
            Self::Surname => "Surname",
            Self::Name => "Name",
            Self::Patronymic => "Patronymic",
            Self::Email => "Email",
            Self::Age => "Age",
            Self::Nationality => "Nationality",
            Self::Country => "Country",
            Self::Gender => "Gender",
            Self::Interests => "Interests",
            Self::Skills => "Skills",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn full_message(&self) -> String {
        format!("{} {}", self.field, self.message)
    }
}

/// Ordered collection of field errors for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages attached to one field, without the field prefix
    pub fn on(&self, field: Field) -> Vec<&str> {
        self.0
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message.as_str())
            .collect()
    }

    /// "<Field> <message>" strings in insertion order
    pub fn full_messages(&self) -> Vec<String> {
        self.0.iter().map(FieldError::full_message).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

/// Run every check over the form and build the registration command.
///
/// All failures are collected. The age range and gender membership checks
/// only run once the value has the right shape.
pub fn validate(form: &RegistrationForm) -> Result<NewUser, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let surname = required_text(&mut errors, Field::Surname, form.surname.as_ref());
    let name = required_text(&mut errors, Field::Name, form.name.as_ref());
    let patronymic = required_text(&mut errors, Field::Patronymic, form.patronymic.as_ref());
    let email = required_text(&mut errors, Field::Email, form.email.as_ref());
    let age = required_integer(&mut errors, Field::Age, form.age.as_ref())
        .and_then(|age| age_in_range(&mut errors, age));
    let nationality = required_text(&mut errors, Field::Nationality, form.nationality.as_ref());
    let country = required_text(&mut errors, Field::Country, form.country.as_ref());
    let gender = required_text(&mut errors, Field::Gender, form.gender.as_ref())
        .and_then(|gender| included_gender(&mut errors, &gender));
    let interests = optional_names(&mut errors, Field::Interests, form.interests.as_ref());
    let skills = optional_text(&mut errors, Field::Skills, form.skills.as_ref());

    if !errors.is_empty() {
        return Err(errors);
    }

    let (
        Some(surname),
        Some(name),
        Some(patronymic),
        Some(email),
        Some(age),
        Some(nationality),
        Some(country),
        Some(gender),
        Some(interests),
        Some(skills),
    ) = (
        surname,
        name,
        patronymic,
        email,
        age,
        nationality,
        country,
        gender,
        interests,
        skills,
    )
    else {
        return Err(errors);
    };

    let profile = UserProfile {
        surname,
        name,
        patronymic,
        email,
        age,
        nationality,
        country,
        gender,
    };
    Ok(NewUser::new(profile, interests, skills))
}

fn required_text(errors: &mut ValidationErrors, field: Field, value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.add(field, REQUIRED);
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.add(field, INVALID_STRING);
            None
        }
    }
}

fn optional_text(errors: &mut ValidationErrors, field: Field, value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.add(field, INVALID_STRING);
            None
        }
    }
}

fn optional_names(
    errors: &mut ValidationErrors,
    field: Field,
    value: Option<&Value>,
) -> Option<Vec<String>> {
    match value {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::Array(items)) => {
            let names: Option<Vec<String>> = items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect();
            if names.is_none() {
                errors.add(field, INVALID_NESTED);
            }
            names
        }
        Some(_) => {
            errors.add(field, INVALID_ARRAY);
            None
        }
    }
}

// Form-encoded clients send numbers as strings, a blank string counts as missing.
fn required_integer(errors: &mut ValidationErrors, field: Field, value: Option<&Value>) -> Option<i64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            errors.add(field, REQUIRED);
            return None;
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            errors.add(field, REQUIRED);
            return None;
        }
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    if parsed.is_none() {
        errors.add(field, INVALID_INTEGER);
    }
    parsed
}

fn age_in_range(errors: &mut ValidationErrors, age: i64) -> Option<i32> {
    if age <= 0 {
        errors.add(Field::Age, NOT_GREATER_THAN_ZERO);
        return None;
    }
    if age > MAX_AGE {
        errors.add(Field::Age, ABOVE_MAX_AGE);
        return None;
    }
    i32::try_from(age).ok()
}

fn included_gender(errors: &mut ValidationErrors, value: &str) -> Option<Gender> {
    let gender = Gender::parse(value);
    if gender.is_none() {
        errors.add(Field::Gender, NOT_INCLUDED);
    }
    gender
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use serde_json::{Value, json};

    use super::*;

    #[fixture]
    fn valid_params() -> Value {
        json!({
            "surname": "Smith",
            "name": "John",
            "patronymic": "Doe",
            "email": "john.smith@example.com",
            "age": 30,
            "nationality": "American",
            "country": "USA",
            "gender": "male",
            "interests": ["Sports"],
            "skills": "Ruby, Rails"
        })
    }

    fn form_with(mut params: Value, key: &str, value: Value) -> RegistrationForm {
        params[key] = value;
        serde_json::from_value(params).unwrap()
    }

    fn form_without(mut params: Value, key: &str) -> RegistrationForm {
        params.as_object_mut().unwrap().remove(key);
        serde_json::from_value(params).unwrap()
    }

    #[rstest]
    fn valid_params_produce_a_command(valid_params: Value) {
        let form: RegistrationForm = serde_json::from_value(valid_params).unwrap();
        let new_user = validate(&form).unwrap();

        assert_eq!(new_user.full_name(), "Smith John Doe");
        assert_eq!(new_user.email(), "john.smith@example.com");
        assert_eq!(new_user.profile().age, 30);
        assert_eq!(new_user.profile().gender, Gender::Male);
        assert_eq!(new_user.interest_names(), vec!["Sports"]);
        assert_eq!(new_user.skill_names(), vec!["Ruby", "Rails"]);
    }

    #[rstest]
    #[case(json!(1))]
    #[case(json!(90))]
    #[case(json!("45"))]
    fn age_within_bounds_is_accepted(valid_params: Value, #[case] age: Value) {
        let form = form_with(valid_params, "age", age);
        assert!(validate(&form).is_ok());
    }

    #[rstest]
    #[case(json!(0), NOT_GREATER_THAN_ZERO)]
    #[case(json!(-5), NOT_GREATER_THAN_ZERO)]
    #[case(json!(91), ABOVE_MAX_AGE)]
    #[case(json!(100), ABOVE_MAX_AGE)]
    #[case(json!("abc"), INVALID_INTEGER)]
    #[case(json!(30.5), INVALID_INTEGER)]
    #[case(json!(""), REQUIRED)]
    fn age_outside_bounds_is_rejected(
        valid_params: Value,
        #[case] age: Value,
        #[case] message: &str,
    ) {
        let form = form_with(valid_params, "age", age);
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.on(Field::Age), vec![message]);
        assert_eq!(errors.full_messages().len(), 1);
    }

    #[rstest]
    fn age_above_maximum_has_readable_message(valid_params: Value) {
        let form = form_with(valid_params, "age", json!(100));
        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.full_messages(),
            vec!["Age must be less than or equal to 90"]
        );
    }

    #[rstest]
    #[case("male", Gender::Male)]
    #[case("female", Gender::Female)]
    fn listed_gender_is_accepted(valid_params: Value, #[case] value: &str, #[case] gender: Gender) {
        let form = form_with(valid_params, "gender", json!(value));
        assert_eq!(validate(&form).unwrap().profile().gender, gender);
    }

    #[rstest]
    #[case("other")]
    #[case("Male")]
    #[case("FEMALE")]
    fn unlisted_gender_is_an_inclusion_error(valid_params: Value, #[case] value: &str) {
        let form = form_with(valid_params, "gender", json!(value));
        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.full_messages(),
            vec!["Gender is not included in the list"]
        );
    }

    #[rstest]
    #[case("surname", "Surname is required")]
    #[case("name", "Name is required")]
    #[case("patronymic", "Patronymic is required")]
    #[case("email", "Email is required")]
    #[case("age", "Age is required")]
    #[case("nationality", "Nationality is required")]
    #[case("country", "Country is required")]
    #[case("gender", "Gender is required")]
    fn missing_required_field_is_reported(
        valid_params: Value,
        #[case] key: &str,
        #[case] message: &str,
    ) {
        let form = form_without(valid_params, key);
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.full_messages(), vec![message]);
    }

    #[rstest]
    fn blank_text_is_rejected(valid_params: Value) {
        let form = form_with(valid_params, "surname", json!("   "));
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.full_messages(), vec!["Surname can't be blank"]);
    }

    #[rstest]
    fn non_string_text_is_rejected(valid_params: Value) {
        let form = form_with(valid_params, "email", json!(42));
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.on(Field::Email), vec![INVALID_STRING]);
    }

    #[test]
    fn every_failure_is_collected_in_field_order() {
        let form: RegistrationForm = serde_json::from_value(json!({
            "name": "John",
            "patronymic": "Doe",
            "email": "john.smith@example.com",
            "age": 0,
            "nationality": "American",
            "country": "USA",
            "gender": "other",
            "skills": 12
        }))
        .unwrap();

        let errors = validate(&form).unwrap_err();
        assert_eq!(
            errors.full_messages(),
            vec![
                "Surname is required",
                "Age must be greater than 0",
                "Gender is not included in the list",
                "Skills is not a valid string",
            ]
        );
    }

    #[rstest]
    fn optional_lists_default_to_empty(valid_params: Value) {
        let form = form_without(form_value_without(valid_params, "interests"), "skills");
        let new_user = validate(&form).unwrap();
        assert!(new_user.interest_names().is_empty());
        assert!(new_user.skill_names().is_empty());
    }

    fn form_value_without(mut params: Value, key: &str) -> Value {
        params.as_object_mut().unwrap().remove(key);
        params
    }

    #[rstest]
    #[case(json!("Sports"), INVALID_ARRAY)]
    #[case(json!(["Sports", 3]), INVALID_NESTED)]
    fn malformed_interests_are_rejected(
        valid_params: Value,
        #[case] interests: Value,
        #[case] message: &str,
    ) {
        let form = form_with(valid_params, "interests", interests);
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.on(Field::Interests), vec![message]);
    }

    #[test]
    fn email_taken_error_reads_already_exists() {
        let errors = ValidationErrors::single(Field::Email, ALREADY_EXISTS);
        assert_eq!(errors.on(Field::Email), vec!["already exists"]);
        assert_eq!(errors.full_messages(), vec!["Email already exists"]);
        assert_eq!(errors.to_string(), "Email already exists");
    }
}
