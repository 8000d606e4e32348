//! In-memory adapters for the repository ports.
//!
//! They honour the same contracts as the PostgreSQL adapters (email
//! uniqueness, `NotFound` on missing rows) and back the integration tests.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::ports::AccountRepository;
use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;

/// Accounts keyed by exact email.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        match accounts.entry(account.email.as_str().to_string()) {
            Entry::Occupied(entry) => Err(AccountError::EmailAlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(account).clone()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }
}

/// Tasks in insertion order.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self.tasks.read().await.iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, id: TaskId, command: UpdateTaskCommand) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;

        task.title = command.title;
        task.description = command.description;
        task.completed = command.completed;

        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let mut tasks = self.tasks.write().await;
        let position = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;

        tasks.remove(position);
        Ok(())
    }
}
