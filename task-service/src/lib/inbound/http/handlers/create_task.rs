use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::task::models::CreateTaskCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    ApiJson(body): ApiJson<CreateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task = state
        .task_service
        .create_task(body.into_command())
        .await
        .map_err(ApiError::from)?;

    tracing::info!(task_id = %task.id, account_id = %caller.account_id, "Task created");

    Ok(ApiSuccess::new(StatusCode::CREATED, (&task).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
}

impl CreateTaskRequest {
    fn into_command(self) -> CreateTaskCommand {
        CreateTaskCommand {
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}
