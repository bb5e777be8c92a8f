use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::identity::models::SubjectId;
use crate::todo::errors::TodoError;
use crate::todo::models::EditTodoCommand;
use crate::todo::models::Priority;
use crate::todo::models::Title;
use crate::todo::models::Todo;
use crate::todo::models::TodoId;
use crate::todo::ports::TodoRepository;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: PgRow) -> Result<Todo, TodoError> {
        let priority: String = row.get("priority");

        Ok(Todo {
            id: TodoId(row.get::<Uuid, _>("id")),
            owner: SubjectId(row.get::<Uuid, _>("owner_id")),
            title: Title::new(row.get("title"))?,
            description: row.get("description"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
            deadline: row.get::<Option<DateTime<Utc>>, _>("deadline"),
            priority: priority.parse::<Priority>()?,
            status: row.get("status"),
        })
    }
}

fn database_error(e: sqlx::Error) -> TodoError {
    tracing::error!(error = %e, "Todo query failed");
    TodoError::DatabaseError(e.to_string())
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, owner_id, title, description, created_at, deadline, priority, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.owner.0)
        .bind(todo.title.as_str())
        .bind(&todo.description)
        .bind(todo.created_at)
        .bind(todo.deadline)
        .bind(todo.priority.as_str())
        .bind(todo.status)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(todo)
    }

    async fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, created_at, deadline, priority, status
            FROM todos
            WHERE owner_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Self::row_to_todo).collect()
    }

    async fn update(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        command: EditTodoCommand,
    ) -> Result<Todo, TodoError> {
        // Only the provided columns change; `status` is never written here
        let row = sqlx::query(
            r#"
            UPDATE todos
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                deadline = COALESCE($5, deadline),
                priority = COALESCE($6, priority)
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, title, description, created_at, deadline, priority, status
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .bind(command.title.as_ref().map(Title::as_str))
        .bind(command.description)
        .bind(command.deadline)
        .bind(command.priority.map(|p| p.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Self::row_to_todo)
            .transpose()?
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    async fn set_status(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        status: bool,
    ) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET status = $3
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, owner: &SubjectId, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
