use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::delete_todo::delete_todo;
use super::handlers::edit_todo::edit_todo;
use super::handlers::list_task_statuses::list_task_statuses;
use super::handlers::list_todos::list_todos;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_todo_status::update_todo_status;
use super::middleware::authenticate as auth_middleware;
use crate::config::CorsConfig;
use crate::identity::ports::IdentityServicePort;
use crate::todo::ports::TodoServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    cors: CorsLayer,
) -> Router {
    let state = AppState {
        identity_service,
        todo_service,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login));

    let protected_routes = Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/:id/status", put(update_todo_status))
        .route("/api/todos/:id", patch(edit_todo).delete(delete_todo))
        .route("/api/tasks/status", get(list_task_statuses))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out of the span: they carry bearer tokens
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// CORS for the web client. `*` allows any origin.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origin == "*" {
        return Ok(layer.allow_origin(Any));
    }

    Ok(layer.allow_origin(config.allowed_origin.parse::<HeaderValue>()?))
}
