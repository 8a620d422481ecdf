use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::task::errors::TaskError;
use crate::task::models::CreateTaskCommand;
use crate::task::models::NewTask;
use crate::task::models::PageRequest;
use crate::task::models::Task;
use crate::task::models::TaskId;
use crate::task::models::TaskPage;
use crate::task::models::UpdateTaskCommand;

/// Port for ownership-scoped task operations.
///
/// Every operation takes the authenticated owner first and only ever sees
/// that owner's tasks. A task owned by someone else is reported exactly like
/// a missing one.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// List one page of the owner's tasks.
    ///
    /// # Arguments
    /// * `owner` - Authenticated account
    /// * `page` - Normalized pagination window
    ///
    /// # Returns
    /// Page of tasks plus the owner's total task count
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, owner: AccountId, page: PageRequest) -> Result<TaskPage, TaskError>;

    /// Create a task owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, owner: AccountId, command: CreateTaskCommand)
        -> Result<Task, TaskError>;

    /// Retrieve one of the owner's tasks.
    ///
    /// # Errors
    /// * `NotFound` - No task with this id belongs to the owner
    /// * `DatabaseError` - Database operation failed
    async fn get(&self, owner: AccountId, id: TaskId) -> Result<Task, TaskError>;

    /// Merge the provided fields into one of the owner's tasks.
    ///
    /// # Arguments
    /// * `owner` - Authenticated account
    /// * `id` - Task to update
    /// * `command` - Fields to change; the owner is not among them
    ///
    /// # Returns
    /// Task as merged and written
    ///
    /// # Errors
    /// * `NotFound` - No task with this id belongs to the owner
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        owner: AccountId,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// Delete one of the owner's tasks. Deleting a missing or foreign task is a no-op.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: AccountId, id: TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for tasks, every one filtered by owner in the store.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Retrieve a window of the owner's tasks ordered by id.
    ///
    /// # Returns
    /// Tasks in the window and the owner's total task count
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner_paged(
        &self,
        owner: AccountId,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Task>, u64), TaskError>;

    /// Retrieve the task matching both owner and id.
    ///
    /// # Returns
    /// Optional task (None if missing or owned by another account)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_one_by_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
    ) -> Result<Option<Task>, TaskError>;

    /// Persist new task; the store assigns the id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, task: NewTask) -> Result<Task, TaskError>;

    /// Overwrite the mutable fields of the task matching both owner and id.
    ///
    /// # Returns
    /// Number of rows written (0 or 1)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update_where_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
        task: &Task,
    ) -> Result<u64, TaskError>;

    /// Remove the task matching both owner and id.
    ///
    /// # Returns
    /// Number of rows removed (0 or 1)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_where_owner_and_id(&self, owner: AccountId, id: TaskId)
        -> Result<u64, TaskError>;
}
