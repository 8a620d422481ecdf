use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedOwner;
use crate::inbound::http::router::AppState;
use crate::task::errors::TaskError;
use crate::task::models::TaskId;
use crate::task::models::TaskTitle;
use crate::task::models::UpdateTaskCommand;
use crate::task::ports::TaskServicePort;

pub async fn update_task<AS, TS>(
    State(state): State<AppState<AS, TS>>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Path(task_id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    let task_id = TaskId::from_string(&task_id).map_err(TaskError::from)?;

    state
        .task_service
        .update(owner.owner_id, task_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

/// HTTP request body for updating a task; absent fields are left unchanged.
///
/// `user_id` is accepted and ignored, so ownership can never be transferred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
    #[serde(default, rename = "user_id")]
    _user_id: Option<serde_json::Value>,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, TaskError> {
        let title = self.title.map(TaskTitle::new).transpose()?;
        Ok(UpdateTaskCommand {
            title,
            description: self.description,
            completed: self.completed,
        })
    }
}
