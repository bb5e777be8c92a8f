use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::identity::errors::IdentityError;
use crate::todo::errors::TodoError;

pub mod create_todo;
pub mod delete_todo;
pub mod edit_todo;
pub mod list_task_statuses;
pub mod list_todos;
pub mod login;
pub mod register;
pub mod update_todo_status;

/// Successful response: status code plus a JSON body serialized as-is.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejections (wrong content type, malformed
/// JSON, mistyped fields) answer with the usual `{"msg": ...}` body.
///
/// Handlers with a route-specific message take `Result<ApiJson<T>, ApiError>`
/// and map the error themselves.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(MessageResponseData { msg })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        ApiError::BadRequest("Invalid request body".to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MissingCredentials
            | IdentityError::DuplicateIdentity(_)
            | IdentityError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            IdentityError::Unauthorized | IdentityError::InvalidToken(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            IdentityError::Password(_)
            | IdentityError::Token(_)
            | IdentityError::DatabaseError(_)
            | IdentityError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::MissingTitle
            | TodoError::InvalidStatus
            | TodoError::InvalidTodoId(_)
            | TodoError::InvalidDeadline(_)
            | TodoError::InvalidPriority(_) => ApiError::BadRequest(err.to_string()),
            TodoError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TodoError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// `{"msg": ...}` body shared by acknowledgments and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub msg: String,
}

impl MessageResponseData {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_errors_map_to_status() {
        assert_eq!(
            ApiError::from(IdentityError::MissingCredentials),
            ApiError::BadRequest("Missing credentials".to_string())
        );
        assert_eq!(
            ApiError::from(IdentityError::DuplicateIdentity("a@b.c".to_string())),
            ApiError::BadRequest("User already exists".to_string())
        );
        assert_eq!(
            ApiError::from(IdentityError::InvalidCredentials),
            ApiError::BadRequest("Invalid credentials".to_string())
        );
        assert_eq!(
            ApiError::from(IdentityError::Unauthorized),
            ApiError::Unauthorized("Unauthorized".to_string())
        );
        assert_eq!(
            ApiError::from(IdentityError::InvalidToken("ExpiredSignature".to_string())),
            ApiError::Unauthorized("Invalid token".to_string())
        );
        assert!(matches!(
            ApiError::from(IdentityError::DatabaseError("down".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_todo_errors_map_to_status() {
        assert_eq!(
            ApiError::from(TodoError::MissingTitle),
            ApiError::BadRequest("Title is required".to_string())
        );
        assert_eq!(
            ApiError::from(TodoError::NotFound("x".to_string())),
            ApiError::NotFound("Todo not found".to_string())
        );
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response = ApiError::InternalServerError("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
