use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::identity::errors::IdentityError;
use crate::identity::models::RegisterCommand;
use crate::inbound::http::router::AppState;

/// Register a new identity. Returns an acknowledgment, not a token.
pub async fn register(
    State(state): State<AppState>,
    body: Result<ApiJson<RegisterRequestBody>, ApiError>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    // An absent or unreadable body carries no credentials
    let ApiJson(body) = body.map_err(|_| IdentityError::MissingCredentials)?;

    let command = RegisterCommand::new(
        body.email.unwrap_or_default(),
        body.password.unwrap_or_default(),
    )?;

    state
        .identity_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::CREATED,
                MessageResponseData::new("User registered successfully"),
            )
        })
}

/// HTTP request body for registration (raw JSON). Absent fields are
/// reported as missing credentials rather than rejected by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: Option<String>,
    password: Option<String>,
}
