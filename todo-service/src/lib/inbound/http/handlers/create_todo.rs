use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::identity::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::todo::errors::TodoError;
use crate::todo::models::parse_deadline;
use crate::todo::models::CreateTodoCommand;
use crate::todo::models::Priority;
use crate::todo::models::Title;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateTodoRequest>,
) -> Result<ApiSuccess<CreateTodoResponseData>, ApiError> {
    state
        .todo_service
        .create_todo(&auth_user.subject_id(), body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|todo| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreateTodoResponseData {
                    msg: "Todo created".to_string(),
                    id: todo.id.to_string(),
                },
            )
        })
}

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: Option<String>,
    description: Option<String>,
    deadline: Option<String>,
    priority: Option<String>,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        let title = Title::new(self.title.unwrap_or_default())?;
        // Empty strings count as "not provided", as a blank form field would
        let deadline = self
            .deadline
            .filter(|d| !d.is_empty())
            .map(|d| parse_deadline(&d))
            .transpose()?;
        let priority = self
            .priority
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<Priority>())
            .transpose()?
            .unwrap_or_default();

        Ok(CreateTodoCommand {
            title,
            description: self.description.unwrap_or_default(),
            deadline,
            priority,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTodoResponseData {
    pub msg: String,
    #[serde(rename = "_id")]
    pub id: String,
}
