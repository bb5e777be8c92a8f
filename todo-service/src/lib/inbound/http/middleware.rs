use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::identity::errors::IdentityError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that validates the bearer token and adds the caller to request extensions
///
/// Handlers behind it read `Extension<AuthenticatedUser>`; the subject id is
/// taken from the token only, never from the request body or path.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = {
        let token = extract_bearer_token(req.headers()).inspect_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Request rejected");
        })?;

        state.identity_service.verify_token(token).inspect_err(|e| {
            tracing::warn!(error = ?e, uri = %req.uri(), "JWT validation failed");
        })?
    };

    tracing::debug!(subject_id = %user.subject_id(), "Request authenticated");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Pull the credential out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. A missing header, a non-UTF8
/// value, another scheme or an empty credential all count as unauthorized.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, IdentityError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(IdentityError::Unauthorized)?
        .to_str()
        .map_err(|_| IdentityError::Unauthorized)?;

    let (scheme, credential) = value.split_once(' ').ok_or(IdentityError::Unauthorized)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(IdentityError::Unauthorized);
    }

    let token = credential.trim();
    if token.is_empty() {
        return Err(IdentityError::Unauthorized);
    }

    Ok(token)
}
