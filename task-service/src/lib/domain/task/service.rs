use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TaskError;
use super::models::CreateTaskCommand;
use super::models::Task;
use super::models::TaskId;
use super::models::UpdateTaskCommand;
use super::ports::TaskRepository;
use super::ports::TaskServicePort;

/// Concrete implementation of TaskServicePort.
///
/// Generic over repository for testability.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError> {
        let task = Task {
            id: TaskId::new(),
            title: command.title,
            description: command.description,
            completed: command.completed,
            created_at: Utc::now(),
        };

        self.repository.create(task).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.repository.list_all().await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    async fn update_task(
        &self,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        self.repository.update(id, command).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), TaskError> {
        self.repository.delete(id).await
    }
}
