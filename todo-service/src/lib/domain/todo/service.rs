use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::identity::models::SubjectId;
use crate::todo::errors::TodoError;
use crate::todo::models::CreateTodoCommand;
use crate::todo::models::EditTodoCommand;
use crate::todo::models::TaskStatus;
use crate::todo::models::Todo;
use crate::todo::models::TodoId;
use crate::todo::ports::TodoRepository;
use crate::todo::ports::TodoServicePort;

/// Domain service implementation for todo operations.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn list_todos(&self, owner: &SubjectId) -> Result<Vec<Todo>, TodoError> {
        self.repository.list_by_owner(owner).await
    }

    async fn create_todo(
        &self,
        owner: &SubjectId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = Todo {
            id: TodoId::new(),
            owner: *owner,
            title: command.title,
            description: command.description,
            created_at: Utc::now(),
            deadline: command.deadline,
            priority: command.priority,
            status: false,
        };

        let created = self.repository.create(todo).await?;
        tracing::debug!(todo_id = %created.id, subject_id = %owner, "Todo created");

        Ok(created)
    }

    async fn set_status(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        status: bool,
    ) -> Result<(), TodoError> {
        self.repository.set_status(owner, id, status).await
    }

    async fn edit_todo(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        command: EditTodoCommand,
    ) -> Result<Todo, TodoError> {
        let updated = self.repository.update(owner, id, command).await?;
        tracing::debug!(todo_id = %id, subject_id = %owner, "Todo updated");

        Ok(updated)
    }

    async fn delete_todo(&self, owner: &SubjectId, id: &TodoId) -> Result<(), TodoError> {
        self.repository.delete(owner, id).await?;
        tracing::debug!(todo_id = %id, subject_id = %owner, "Todo deleted");
        Ok(())
    }

    async fn list_task_statuses(&self, owner: &SubjectId) -> Result<Vec<TaskStatus>, TodoError> {
        let todos = self.repository.list_by_owner(owner).await?;
        Ok(todos.iter().map(TaskStatus::from).collect())
    }
}
