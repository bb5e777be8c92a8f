use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::models::SubjectId;
use crate::todo::errors::TodoError;

/// Todo aggregate entity.
///
/// Always owned by exactly one subject; every lookup is scoped by `owner`.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    pub owner: SubjectId,
    pub title: Title,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Priority,
    /// Completed flag
    pub status: bool,
}

/// Todo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidTodoId` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoError::InvalidTodoId(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// # Errors
    /// * `MissingTitle` - Title is empty
    pub fn new(title: String) -> Result<Self, TodoError> {
        if title.is_empty() {
            return Err(TodoError::MissingTitle);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(TodoError::InvalidPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a deadline as sent by clients.
///
/// Accepts an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date which is
/// taken as midnight UTC (what a date input field produces).
///
/// # Errors
/// * `InvalidDeadline` - Neither format matches
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, TodoError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TodoError::InvalidDeadline(raw.to_string()))
}

/// Command to create a todo with validated fields
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: Title,
    pub description: String,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Priority,
}

/// Command to edit an existing todo.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct EditTodoCommand {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
}

impl EditTodoCommand {
    pub fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(deadline) = self.deadline {
            todo.deadline = Some(deadline);
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
    }
}

/// Title/status projection of a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatus {
    pub title: String,
    pub status: bool,
}

impl From<&Todo> for TaskStatus {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.as_str().to_string(),
            status: todo.status,
        }
    }
}
