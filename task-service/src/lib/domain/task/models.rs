use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::TaskIdError;

/// Task entity.
///
/// Tasks are not owned by an account: any authenticated caller can read and
/// write any task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Task unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        Uuid::parse_str(s)
            .map(TaskId)
            .map_err(|e| TaskIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new task
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Command replacing every mutable field of a task.
///
/// `id` and `created_at` never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskCommand {
    pub title: String,
    pub description: String,
    pub completed: bool,
}
