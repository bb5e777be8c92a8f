use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::identity::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::TodoId;

pub async fn update_todo_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<ApiJson<UpdateStatusRequest>, ApiError>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let todo_id = TodoId::from_string(&id)?;
    // A missing or unreadable body is reported like a non-boolean status
    let status = body
        .ok()
        .and_then(|ApiJson(body)| body.status)
        .and_then(|status| status.as_bool())
        .ok_or(TodoError::InvalidStatus)?;

    state
        .todo_service
        .set_status(&auth_user.subject_id(), &todo_id, status)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageResponseData::new("Todo status updated")))
}

/// Status is taken as a raw JSON value so that a non-boolean is reported
/// as an invalid status instead of an extractor rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStatusRequest {
    status: Option<serde_json::Value>,
}
