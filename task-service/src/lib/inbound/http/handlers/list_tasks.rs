use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    tracing::debug!(account_id = %caller.account_id, "Listing tasks");

    state
        .task_service
        .list_tasks()
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect()))
}
