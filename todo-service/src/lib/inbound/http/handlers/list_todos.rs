use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::identity::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::models::Todo;

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<TodoResponseData>>, ApiError> {
    state
        .todo_service
        .list_todos(&auth_user.subject_id())
        .await
        .map_err(ApiError::from)
        .map(|todos| ApiSuccess::new(StatusCode::OK, todos.iter().map(Into::into).collect()))
}

/// Todo as the web client reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponseData {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: String,
    pub status: bool,
}

impl From<&Todo> for TodoResponseData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            user_id: todo.owner.to_string(),
            title: todo.title.as_str().to_string(),
            description: todo.description.clone(),
            created_at: todo.created_at,
            deadline: todo.deadline,
            priority: todo.priority.to_string(),
            status: todo.status,
        }
    }
}
