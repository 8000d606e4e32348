use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::task::errors::TaskError;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Full replacement of a task's mutable fields.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::from_string(&id).map_err(TaskError::from)?;

    let task = state
        .task_service
        .update_task(task_id, body.into_command())
        .await
        .map_err(ApiError::from)?;

    tracing::info!(%task_id, account_id = %caller.account_id, "Task updated");

    Ok(ApiSuccess::new(StatusCode::OK, (&task).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskRequest {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
}

impl UpdateTaskRequest {
    fn into_command(self) -> UpdateTaskCommand {
        UpdateTaskCommand {
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}
