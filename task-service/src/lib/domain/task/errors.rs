use thiserror::Error;

use super::models::TaskId;

/// Error type for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error type for all task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
