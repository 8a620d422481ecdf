use std::fmt;

use crate::account::models::AccountId;
use crate::task::errors::TaskIdError;
use crate::task::errors::TaskTitleError;

/// Task owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub owner: AccountId,
    pub title: TaskTitle,
    pub description: String,
    pub completed: bool,
}

/// Task identifier assigned by the store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Parse a task ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        s.parse::<i64>()
            .map(TaskId)
            .map_err(|e| TaskIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task title value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a new valid title.
    ///
    /// # Arguments
    /// * `title` - Raw title string
    ///
    /// # Returns
    /// Validated TaskTitle value object
    ///
    /// # Errors
    /// * `Empty` - Title is empty or whitespace
    /// * `TooLong` - Title longer than 200 characters
    pub fn new(title: String) -> Result<Self, TaskTitleError> {
        let length = title.chars().count();
        if title.trim().is_empty() {
            Err(TaskTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TaskTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task data handed to the store; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub owner: AccountId,
    pub title: TaskTitle,
    pub description: String,
    pub completed: bool,
}

/// Command for creating a task.
///
/// Carries no owner: the service always uses the authenticated caller.
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: String,
    pub completed: bool,
}

impl CreateTaskCommand {
    pub fn new(title: TaskTitle, description: Option<String>, completed: Option<bool>) -> Self {
        Self {
            title,
            description: description.unwrap_or_default(),
            completed: completed.unwrap_or(false),
        }
    }
}

/// Command for a partial task update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTaskCommand {
    /// Apply the provided fields to `task`.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Normalized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u64 = 10;

    /// Build a page request, clamping `page < 1` to 1 and `page_size < 1` to 10.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = match page {
            Some(page) if page >= 1 => page as u64,
            _ => 1,
        };
        let page_size = match page_size {
            Some(size) if size >= 1 => size as u64,
            _ => Self::DEFAULT_PAGE_SIZE,
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of an owner's tasks together with the owner's total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub page: PageRequest,
    pub total: u64,
}
