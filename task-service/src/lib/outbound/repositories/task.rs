use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: TaskId(row.id),
            title: row.title,
            description: row.description,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        // Stored row is returned: TIMESTAMPTZ keeps microseconds only.
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (id, title, description, completed, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, completed, created_at
            "#,
        )
        .bind(task.id.0)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, completed, created_at
            FROM tasks
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, completed, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Task::from))
    }

    async fn update(&self, id: TaskId, command: UpdateTaskCommand) -> Result<Task, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, completed = $4
            WHERE id = $1
            RETURNING id, title, description, completed, created_at
            "#,
        )
        .bind(id.0)
        .bind(command.title)
        .bind(command.description)
        .bind(command.completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Task::from).ok_or(TaskError::NotFound(id))
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}
