use async_trait::async_trait;

use super::errors::TaskError;
use super::models::CreateTaskCommand;
use super::models::Task;
use super::models::TaskId;
use super::models::UpdateTaskCommand;

/// Port for task domain service operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task with a server-generated ID and creation time.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError>;

    /// List every task.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError>;

    /// Retrieve a task by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_task(&self, id: TaskId) -> Result<Task, TaskError>;

    /// Replace the mutable fields of a task.
    ///
    /// # Returns
    /// Task as stored after the update
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_task(&self, id: TaskId, command: UpdateTaskCommand)
        -> Result<Task, TaskError>;

    /// Delete a task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_task(&self, id: TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for tasks.
///
/// Each method is a single statement; atomicity per call is the store's job.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    /// Oldest first.
    async fn list_all(&self) -> Result<Vec<Task>, TaskError>;

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError>;

    /// # Errors
    /// * `NotFound` - No row matched `id`
    async fn update(&self, id: TaskId, command: UpdateTaskCommand) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - No row matched `id`
    async fn delete(&self, id: TaskId) -> Result<(), TaskError>;
}
