use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::task::errors::TaskError;
use crate::task::models::Task;

pub mod create_task;
pub mod delete_task;
pub mod get_task;
pub mod list_tasks;
pub mod login;
pub mod register;
pub mod update_task;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateUsername(_) => ApiError::Conflict(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::InvalidUsername(_) | AccountError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AccountError::Hashing(_)
            | AccountError::TokenIssuance(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::InvalidTitle(_) => ApiError::UnprocessableEntity(err.to_string()),
            TaskError::InvalidTaskId(_) => ApiError::BadRequest(err.to_string()),
            TaskError::DatabaseError(_) | TaskError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<auth::Unauthenticated> for ApiError {
    fn from(err: auth::Unauthenticated) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Task representation shared by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskData {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl From<&Task> for TaskData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.as_i64(),
            user_id: task.owner.as_i64(),
            title: task.title.as_str().to_string(),
            description: task.description.clone(),
            completed: task.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::errors::UsernameError;
    use crate::task::models::TaskId;

    #[test]
    fn test_account_error_mapping() {
        assert!(matches!(
            ApiError::from(AccountError::DuplicateUsername("alice".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::InvalidUsername(UsernameError::Empty)),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::Hashing("bad salt".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_task_error_mapping() {
        assert_eq!(
            ApiError::from(TaskError::NotFound(TaskId(3))),
            ApiError::NotFound("Task not found: 3".to_string())
        );
        assert!(matches!(
            ApiError::from(TaskError::DatabaseError("down".to_string())),
            ApiError::InternalServerError(_)
        ));

        let malformed = TaskId::from_string("abc").map_err(TaskError::from).unwrap_err();
        assert!(matches!(
            ApiError::from(malformed),
            ApiError::BadRequest(message) if message.starts_with("Invalid task id")
        ));
    }

    #[tokio::test]
    async fn test_internal_error_message_is_not_leaked() {
        let response =
            ApiError::InternalServerError("relation \"tasks\" does not exist".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], 500);
        assert_eq!(body["data"]["message"], "Internal server error");
    }
}
