use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedOwner;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;
use crate::task::models::TaskId;
use crate::task::ports::TaskServicePort;

pub async fn get_task<AS, TS>(
    State(state): State<AppState<AS, TS>>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<TaskData>, ApiError>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;

    state
        .task_service
        .get(owner.owner_id, task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
