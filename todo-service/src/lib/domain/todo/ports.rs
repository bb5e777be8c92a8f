use async_trait::async_trait;

use crate::identity::models::SubjectId;
use crate::todo::errors::TodoError;
use crate::todo::models::CreateTodoCommand;
use crate::todo::models::EditTodoCommand;
use crate::todo::models::TaskStatus;
use crate::todo::models::Todo;
use crate::todo::models::TodoId;

/// Port for todo domain service operations.
///
/// Every operation takes the owner explicitly; implementations must never
/// read or write a todo belonging to another subject.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// List the owner's todos, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self, owner: &SubjectId) -> Result<Vec<Todo>, TodoError>;

    /// Create a todo stamped with `owner`, not yet completed.
    ///
    /// # Returns
    /// Created todo entity
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        owner: &SubjectId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Mark the owner's todo as completed or not.
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn set_status(&self, owner: &SubjectId, id: &TodoId, status: bool)
        -> Result<(), TodoError>;

    /// Partially update the owner's todo.
    ///
    /// # Returns
    /// Updated todo entity
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn edit_todo(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        command: EditTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Delete the owner's todo.
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, owner: &SubjectId, id: &TodoId) -> Result<(), TodoError>;

    /// Title and completion flag of each of the owner's todos.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_task_statuses(&self, owner: &SubjectId) -> Result<Vec<TaskStatus>, TodoError>;
}

/// Persistence operations for todos, always scoped by owner.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist new todo to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Retrieve all todos of one owner, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<Todo>, TodoError>;

    /// Apply a partial edit to the todo matched by `(owner, id)` in one
    /// write. Fields absent from the command, and the completion flag, are
    /// left as stored.
    ///
    /// # Returns
    /// Todo as stored after the edit
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        command: EditTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Set the completion flag.
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn set_status(&self, owner: &SubjectId, id: &TodoId, status: bool)
        -> Result<(), TodoError>;

    /// Remove todo from storage.
    ///
    /// # Errors
    /// * `NotFound` - No such todo for this owner
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: &SubjectId, id: &TodoId) -> Result<(), TodoError>;
}
