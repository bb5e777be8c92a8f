use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::identity::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::models::TaskStatus;

pub async fn list_task_statuses(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<TaskStatusResponseData>>, ApiError> {
    state
        .todo_service
        .list_task_statuses(&auth_user.subject_id())
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatusResponseData {
    pub title: String,
    pub status: bool,
}

impl From<TaskStatus> for TaskStatusResponseData {
    fn from(task: TaskStatus) -> Self {
        Self {
            title: task.title,
            status: task.status,
        }
    }
}
