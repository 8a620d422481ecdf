use thiserror::Error;

use crate::task::models::TaskId;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid task id: {0}")]
    InvalidFormat(String),
}

/// Error for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("title is required")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    #[error("Invalid task id: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    /// Also returned when the task exists but belongs to another account.
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        TaskError::Unknown(err.to_string())
    }
}
