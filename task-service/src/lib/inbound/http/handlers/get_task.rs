use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::task::errors::TaskError;
use crate::domain::task::models::TaskId;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn get_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::from_string(&id).map_err(TaskError::from)?;

    tracing::debug!(%task_id, account_id = %caller.account_id, "Fetching task");

    state
        .task_service
        .get_task(task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
