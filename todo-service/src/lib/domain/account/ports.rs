use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::CredentialsCommand;
use crate::account::models::NewAccount;
use crate::account::models::Username;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CredentialsCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Signed session token for the account
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Hashing` - Stored hash could not be verified
    /// * `TokenIssuance` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: CredentialsCommand) -> Result<String, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by exact (case-sensitive) username.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;

    /// Count accounts holding `username`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count_by_username(&self, username: &Username) -> Result<u64, AccountError>;

    /// Persist new account; the store assigns id and creation time.
    ///
    /// # Arguments
    /// * `account` - Username and password hash to store
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `DuplicateUsername` - Unique constraint on username violated
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountError>;
}
