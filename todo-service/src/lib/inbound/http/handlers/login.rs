use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::identity::errors::IdentityError;
use crate::identity::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<ApiJson<LoginRequestBody>, ApiError>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let ApiJson(body) = body.map_err(|_| IdentityError::InvalidCredentials)?;

    let command = LoginCommand::new(
        body.email.unwrap_or_default(),
        body.password.unwrap_or_default(),
    );

    state
        .identity_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|issued| ApiSuccess::new(StatusCode::OK, LoginResponseData { token: issued.token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
