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
use crate::task::models::CreateTaskCommand;
use crate::task::models::TaskTitle;
use crate::task::ports::TaskServicePort;

pub async fn create_task<AS, TS>(
    State(state): State<AppState<AS, TS>>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError>
where
    AS: AccountServicePort,
    TS: TaskServicePort,
{
    state
        .task_service
        .create(owner.owner_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task (raw JSON)
///
/// A client-supplied `user_id` is accepted and dropped; the owner always
/// comes from the authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    completed: Option<bool>,
    #[serde(default, rename = "user_id")]
    _user_id: Option<serde_json::Value>,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, TaskError> {
        let title = TaskTitle::new(self.title)?;
        Ok(CreateTaskCommand::new(title, self.description, self.completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_in_payload_is_discarded() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "x", "user_id": 999}"#).unwrap();

        let command = request.try_into_command().unwrap();
        assert_eq!(command.title.as_str(), "x");
        assert_eq!(command.description, "");
        assert!(!command.completed);
    }

    #[test]
    fn test_empty_title_rejected() {
        let request: CreateTaskRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(matches!(
            request.try_into_command(),
            Err(TaskError::InvalidTitle(_))
        ));
    }
}
