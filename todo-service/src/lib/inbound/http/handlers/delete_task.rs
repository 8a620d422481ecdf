use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedOwner;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;
use crate::task::models::TaskId;
use crate::task::ports::TaskServicePort;

pub async fn delete_task<AS, TS>(
    State(state): State<AppState<AS, TS>>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<DeleteTaskResponseData>, ApiError>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;

    state
        .task_service
        .delete(owner.owner_id, task_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteTaskResponseData {
                    id: task_id.as_i64(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteTaskResponseData {
    pub id: i64,
}
