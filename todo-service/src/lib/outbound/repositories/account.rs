use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::NewAccount;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            username: Username::new(row.username)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, username, password_hash, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn count_by_username(&self, username: &Username) -> Result<u64, AccountError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(count.max(0) as u64)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row: AccountRow = sqlx::query_as(
            r#"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(account.username.as_str())
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_CONSTRAINT)
                {
                    return AccountError::DuplicateUsername(account.username.as_str().to_string());
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Account::try_from(row)
    }
}
