use std::sync::Arc;

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
use crate::task::ports::TaskRepository;
use crate::task::ports::TaskServicePort;

/// Domain service implementation for ownership-scoped task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn list(&self, owner: AccountId, page: PageRequest) -> Result<TaskPage, TaskError> {
        let (items, total) = self
            .repository
            .find_by_owner_paged(owner, page.offset(), page.limit())
            .await?;

        Ok(TaskPage { items, page, total })
    }

    async fn create(
        &self,
        owner: AccountId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        let task = self
            .repository
            .insert(NewTask {
                owner,
                title: command.title,
                description: command.description,
                completed: command.completed,
            })
            .await?;

        tracing::info!(owner_id = %owner, task_id = %task.id, "Task created");

        Ok(task)
    }

    async fn get(&self, owner: AccountId, id: TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_one_by_owner_and_id(owner, id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    async fn update(
        &self,
        owner: AccountId,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let mut task = self.get(owner, id).await?;

        command.apply_to(&mut task);
        task.owner = owner;

        let rows = self
            .repository
            .update_where_owner_and_id(owner, id, &task)
            .await?;

        if rows == 0 {
            // Removed between the guarded fetch and the write.
            tracing::warn!(owner_id = %owner, task_id = %id, "Task update affected no rows");
        } else {
            tracing::info!(owner_id = %owner, task_id = %id, "Task updated");
        }

        Ok(task)
    }

    async fn delete(&self, owner: AccountId, id: TaskId) -> Result<(), TaskError> {
        let rows = self.repository.delete_where_owner_and_id(owner, id).await?;

        tracing::info!(owner_id = %owner, task_id = %id, rows, "Task delete executed");

        Ok(())
    }
}
