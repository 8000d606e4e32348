use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::TaskId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let task_id = TaskId::from_string(&id).map_err(TaskError::from)?;

    state
        .task_service
        .delete_task(task_id)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(%task_id, account_id = %caller.account_id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}
