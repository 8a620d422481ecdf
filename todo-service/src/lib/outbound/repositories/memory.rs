use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::NewAccount;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::task::errors::TaskError;
use crate::task::models::NewTask;
use crate::task::models::Task;
use crate::task::models::TaskId;
use crate::task::ports::TaskRepository;

/// Rows keyed by id plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Process-local account store with the same uniqueness rule as the
/// `accounts_username_key` constraint.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    table: Arc<RwLock<Table<Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|account| &account.username == username)
            .cloned())
    }

    async fn count_by_username(&self, username: &Username) -> Result<u64, AccountError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|account| &account.username == username)
            .count() as u64)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, AccountError> {
        // Uniqueness is checked under the write lock, like a unique index.
        let mut table = self.table.write().await;

        if table
            .rows
            .values()
            .any(|existing| existing.username == account.username)
        {
            return Err(AccountError::DuplicateUsername(
                account.username.as_str().to_string(),
            ));
        }

        let id = table.allocate_id();
        let created = Account {
            id: AccountId(id),
            username: account.username,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };
        table.rows.insert(id, created.clone());

        Ok(created)
    }
}

/// Process-local task store; every read and write filters on owner and id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    table: Arc<RwLock<Table<Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_owner_paged(
        &self,
        owner: AccountId,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Task>, u64), TaskError> {
        let table = self.table.read().await;

        let owned: Vec<&Task> = table
            .rows
            .values()
            .filter(|task| task.owner == owner)
            .collect();
        let total = owned.len() as u64;

        let items = owned
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn find_one_by_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
    ) -> Result<Option<Task>, TaskError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id.as_i64())
            .filter(|task| task.owner == owner)
            .cloned())
    }

    async fn insert(&self, task: NewTask) -> Result<Task, TaskError> {
        let mut table = self.table.write().await;

        let id = table.allocate_id();
        let created = Task {
            id: TaskId(id),
            owner: task.owner,
            title: task.title,
            description: task.description,
            completed: task.completed,
        };
        table.rows.insert(id, created.clone());

        Ok(created)
    }

    async fn update_where_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
        task: &Task,
    ) -> Result<u64, TaskError> {
        let mut table = self.table.write().await;

        match table
            .rows
            .get_mut(&id.as_i64())
            .filter(|stored| stored.owner == owner)
        {
            Some(stored) => {
                stored.title = task.title.clone();
                stored.description = task.description.clone();
                stored.completed = task.completed;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_where_owner_and_id(
        &self,
        owner: AccountId,
        id: TaskId,
    ) -> Result<u64, TaskError> {
        let mut table = self.table.write().await;

        let owned = table
            .rows
            .get(&id.as_i64())
            .is_some_and(|task| task.owner == owner);
        if !owned {
            return Ok(0);
        }

        table.rows.remove(&id.as_i64());
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::models::TaskTitle;

    const ALICE: AccountId = AccountId(1);
    const BOB: AccountId = AccountId(2);

    fn username(value: &str) -> Username {
        Username::new(value.to_string()).unwrap()
    }

    fn new_task(owner: AccountId, title: &str) -> NewTask {
        NewTask {
            owner,
            title: TaskTitle::new(title.to_string()).unwrap(),
            description: String::new(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_account_insert_assigns_ids_and_enforces_uniqueness() {
        let repository = InMemoryAccountRepository::new();

        let alice = repository
            .insert(NewAccount {
                username: username("alice"),
                password_hash: "$argon2id$a".to_string(),
            })
            .await
            .unwrap();
        let bob = repository
            .insert(NewAccount {
                username: username("bob"),
                password_hash: "$argon2id$b".to_string(),
            })
            .await
            .unwrap();
        assert_ne!(alice.id, bob.id);

        let duplicate = repository
            .insert(NewAccount {
                username: username("alice"),
                password_hash: "$argon2id$c".to_string(),
            })
            .await;
        assert!(matches!(
            duplicate,
            Err(AccountError::DuplicateUsername(_))
        ));

        assert_eq!(repository.count_by_username(&username("alice")).await.unwrap(), 1);
        // Usernames are case-sensitive.
        assert_eq!(repository.count_by_username(&username("Alice")).await.unwrap(), 0);
        assert!(repository
            .find_by_username(&username("Alice"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_paging_over_fifteen_tasks() {
        let repository = InMemoryTaskRepository::new();
        for i in 1..=15 {
            repository
                .insert(new_task(ALICE, &format!("task {}", i)))
                .await
                .unwrap();
        }
        repository.insert(new_task(BOB, "not alice's")).await.unwrap();

        let (first, total) = repository.find_by_owner_paged(ALICE, 0, 10).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(total, 15);

        let (second, total) = repository.find_by_owner_paged(ALICE, 10, 10).await.unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(total, 15);
        assert!(second.iter().all(|task| task.owner == ALICE));

        let (beyond, _) = repository.find_by_owner_paged(ALICE, 20, 10).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_writes_are_filtered_by_owner() {
        let repository = InMemoryTaskRepository::new();
        let task = repository.insert(new_task(ALICE, "buy milk")).await.unwrap();

        assert!(repository
            .find_one_by_owner_and_id(BOB, task.id)
            .await
            .unwrap()
            .is_none());

        let mut hijacked = task.clone();
        hijacked.completed = true;
        assert_eq!(
            repository
                .update_where_owner_and_id(BOB, task.id, &hijacked)
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            repository
                .delete_where_owner_and_id(BOB, task.id)
                .await
                .unwrap(),
            0
        );

        let stored = repository
            .find_one_by_owner_and_id(ALICE, task.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, task);

        assert_eq!(
            repository
                .delete_where_owner_and_id(ALICE, task.id)
                .await
                .unwrap(),
            1
        );
        assert!(repository
            .find_one_by_owner_and_id(ALICE, task.id)
            .await
            .unwrap()
            .is_none());
    }
}
