use thiserror::Error;

/// Top-level error for all todo operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    // Request validation errors
    #[error("Title is required")]
    MissingTitle,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Invalid todo id")]
    InvalidTodoId(String),

    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    // Domain-level errors
    /// No todo with this id belongs to the requesting subject.
    #[error("Todo not found")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
