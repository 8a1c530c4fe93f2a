use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError,
        models::{
            registration::RegistrationForm,
            user::{Timestamp, User},
        },
        repositories::user_registration_repository::UserRegistrationRepository,
    },
    usecase::register_user_usecase::RegisterUserUsecase,
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
pub const MISSING_USER_PARAM: &str = "param is missing or the value is empty: user";
const INTERNAL_ERROR: &str = "Internal server error";

// Request

/// json for create user request, attributes are nested under "user"
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub user: Option<Map<String, Value>>,
}

// Response

/// json for a successful registration
#[derive(Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub status: String,
    pub user: UserInfo,
}

/// json for any failed request
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub errors: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ReferenceInfo {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i32,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub email: String,
    pub age: i32,
    pub nationality: String,
    pub country: String,
    pub gender: String,
    pub full_name: String,
    pub interests: Vec<ReferenceInfo>,
    pub skills: Vec<ReferenceInfo>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id(),
            surname: profile.surname.clone(),
            name: profile.name.clone(),
            patronymic: profile.patronymic.clone(),
            email: profile.email.clone(),
            age: profile.age,
            nationality: profile.nationality.clone(),
            country: profile.country.clone(),
            gender: profile.gender.as_str().to_string(),
            full_name: user.full_name().to_string(),
            interests: user
                .interests()
                .iter()
                .map(|interest| ReferenceInfo {
                    id: interest.id,
                    name: interest.name.clone(),
                })
                .collect(),
            skills: user
                .skills()
                .iter()
                .map(|skill| ReferenceInfo {
                    id: skill.id,
                    name: skill.name.clone(),
                })
                .collect(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

fn error_response(status: StatusCode, errors: Vec<String>) -> Response {
    let body = ErrorResponse {
        status: STATUS_ERROR.to_string(),
        errors,
    };
    (status, Json(body)).into_response()
}

/* Router Function and Handler Function */

// User Router

/// function return Router object
/// Suppose to be merged into the main router
pub fn create_user_router<R: UserRegistrationRepository + 'static + Clone>(
    register_service: RegisterUserUsecase<R>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/users", post(create_user::<R>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<R: UserRegistrationRepository> {
    pub register_service: Arc<RegisterUserUsecase<R>>,
}

// handler function

/// handler function for user registration
async fn create_user<R: UserRegistrationRepository + 'static + Clone>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Response {
    // Every unreadable body is a bad request, whatever the extractor's own status
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(status = %rejection.status(), "rejected request body");
            return error_response(StatusCode::BAD_REQUEST, vec![rejection.body_text()]);
        }
    };

    // Only an absent, null or empty object counts as missing. An object of
    // unknown keys still goes through validation.
    let Some(attributes) = request.user.filter(|attributes| !attributes.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, vec![MISSING_USER_PARAM.to_string()]);
    };
    let form: RegistrationForm = match serde_json::from_value(Value::Object(attributes)) {
        Ok(form) => form,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, vec![err.to_string()]),
    };

    match state.register_service.create_user(form).await {
        Ok(user) => {
            let response = CreateUserResponse {
                status: STATUS_SUCCESS.to_string(),
                user: user.into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(DomainError::Validation(errors)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, errors.full_messages())
        }
        Err(err) => {
            error!(error = %err, "user registration failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                vec![INTERNAL_ERROR.to_string()],
            )
        }
    }
}
