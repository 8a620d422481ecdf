use async_trait::async_trait;
use sqlx::PgPool;

use crate::account::models::AccountId;
use crate::task::errors::TaskError;
use crate::task::models::NewTask;
use crate::task::models::Task;
use crate::task::models::TaskId;
use crate::task::models::TaskTitle;
use crate::task::ports::TaskRepository;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    owner_id: i64,
    title: String,
    description: String,
    completed: bool,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId(row.id),
            owner: AccountId(row.owner_id),
            title: TaskTitle::new(row.title)?,
            description: row.description,
            completed: row.completed,
        })
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_by_owner_paged(
        &self,
        owner: AccountId,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Task>, u64), TaskError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tasks
            WHERE owner_id = $1
            "#,
        )
        .bind(owner.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, title, description, completed
            FROM tasks
            WHERE owner_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner.as_i64())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let items = rows
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total.max(0) as u64))
    }

    async fn find_one_by_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
    ) -> Result<Option<Task>, TaskError> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, title, description, completed
            FROM tasks
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner.as_i64())
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Task::try_from).transpose()
    }

    async fn insert(&self, task: NewTask) -> Result<Task, TaskError> {
        let row: TaskRow = sqlx::query_as(
            r#"
            INSERT INTO tasks (owner_id, title, description, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, description, completed
            "#,
        )
        .bind(task.owner.as_i64())
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.completed)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Task::try_from(row)
    }

    async fn update_where_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
        task: &Task,
    ) -> Result<u64, TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, completed = $5
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner.as_i64())
        .bind(id.as_i64())
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.completed)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_where_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
    ) -> Result<u64, TaskError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner.as_i64())
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
