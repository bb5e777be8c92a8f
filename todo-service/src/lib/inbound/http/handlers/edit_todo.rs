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
use crate::todo::models::parse_deadline;
use crate::todo::models::EditTodoCommand;
use crate::todo::models::Priority;
use crate::todo::models::Title;
use crate::todo::models::TodoId;

/// HTTP request body for editing a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<String>,
}

impl EditTodoRequest {
    fn try_into_command(self) -> Result<EditTodoCommand, TodoError> {
        let non_empty = |field: Option<String>| field.filter(|value| !value.is_empty());

        Ok(EditTodoCommand {
            title: non_empty(self.title).map(Title::new).transpose()?,
            description: non_empty(self.description),
            deadline: non_empty(self.deadline)
                .map(|d| parse_deadline(&d))
                .transpose()?,
            priority: non_empty(self.priority)
                .map(|p| p.parse::<Priority>())
                .transpose()?,
        })
    }
}

pub async fn edit_todo(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EditTodoRequest>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    // Parse id and request at HTTP boundary - errors automatically converted
    let todo_id = TodoId::from_string(&id)?;
    let command = req.try_into_command()?;

    state
        .todo_service
        .edit_todo(&auth_user.subject_id(), &todo_id, command)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageResponseData::new("Todo updated")))
}
