use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::CredentialsCommand;
use crate::account::models::NewAccount;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Registration and login over the account store, delegating hashing and
/// token issuance to the shared authenticator.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Authenticator,
    /// Verified against on unknown-username logins so both paths cost one Argon2 run.
    dummy_hash: String,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Hasher and token issuer built from the token config
    ///
    /// # Returns
    /// Configured account service instance
    ///
    /// # Errors
    /// * `Hashing` - The placeholder hash could not be computed
    pub fn new(repository: Arc<AR>, authenticator: Authenticator) -> Result<Self, AccountError> {
        let dummy_hash = authenticator
            .hash_password("unknown-account-placeholder")
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        Ok(Self {
            repository,
            authenticator,
            dummy_hash,
        })
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: CredentialsCommand) -> Result<Account, AccountError> {
        let existing = self.repository.count_by_username(&command.username).await?;
        if existing > 0 {
            tracing::info!(username = %command.username, "Registration rejected: username taken");
            return Err(AccountError::DuplicateUsername(
                command.username.as_str().to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let account = self
            .repository
            .insert(NewAccount {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = %account.id, username = %account.username, "Account registered");

        Ok(account)
    }

    async fn login(&self, command: CredentialsCommand) -> Result<String, AccountError> {
        let account = match self.repository.find_by_username(&command.username).await? {
            Some(account) => account,
            None => {
                self.authenticator
                    .verify_password(command.password.expose(), &self.dummy_hash)
                    .map_err(|e| AccountError::Hashing(e.to_string()))?;

                tracing::debug!(username = %command.username, "Login failed: unknown username");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let result = self
            .authenticator
            .authenticate(
                command.password.expose(),
                &account.password_hash,
                account.id.as_i64(),
                Utc::now(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(account_id = %account.id, "Login failed: wrong password");
                    AccountError::InvalidCredentials
                }
                AuthenticationError::PasswordError(e) => AccountError::Hashing(e.to_string()),
                AuthenticationError::TokenError(e) => AccountError::TokenIssuance(e.to_string()),
            })?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(result.access_token)
    }
}

#[cfg(test)]
mod tests {
    use auth::AuthorizationGate;
    use auth::TokenConfig;
    use mockall::mock;

    use super::*;
    use crate::account::models::AccountId;
    use crate::account::models::PlainPassword;
    use crate::account::models::Username;

    const SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;
            async fn count_by_username(&self, username: &Username) -> Result<u64, AccountError>;
            async fn insert(&self, account: NewAccount) -> Result<Account, AccountError>;
        }
    }

    fn token_config() -> TokenConfig {
        TokenConfig::with_defaults(SECRET).unwrap()
    }

    fn service(repository: MockTestAccountRepository) -> AccountService<MockTestAccountRepository> {
        AccountService::new(Arc::new(repository), Authenticator::new(&token_config())).unwrap()
    }

    fn credentials(username: &str, password: &str) -> CredentialsCommand {
        CredentialsCommand::new(
            Username::new(username.to_string()).unwrap(),
            PlainPassword::new(password.to_string()).unwrap(),
        )
    }

    fn stored_account(id: i64, username: &str, password: &str) -> Account {
        let hash = Authenticator::new(&token_config())
            .hash_password(password)
            .unwrap();
        Account {
            id: AccountId(id),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: hash,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_count_by_username()
            .times(1)
            .returning(|_| Ok(0));

        repository
            .expect_insert()
            .withf(|account| {
                account.username.as_str() == "alice"
                    && account.password_hash.starts_with("$argon2id$")
                    && !account.password_hash.contains("pw1")
            })
            .times(1)
            .returning(|account| {
                Ok(Account {
                    id: AccountId(1),
                    username: account.username,
                    password_hash: account.password_hash,
                    created_at: Utc::now(),
                })
            });

        let result = service(repository)
            .register(credentials("alice", "pw1"))
            .await;

        let account = result.unwrap();
        assert_eq!(account.id, AccountId(1));
        assert_eq!(account.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_count_by_username()
            .times(1)
            .returning(|_| Ok(1));
        repository.expect_insert().times(0);

        let result = service(repository)
            .register(credentials("alice", "pw2"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::DuplicateUsername(name) if name == "alice"
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_from_store_constraint() {
        let mut repository = MockTestAccountRepository::new();

        // Concurrent registration slipped past the count check.
        repository
            .expect_count_by_username()
            .times(1)
            .returning(|_| Ok(0));
        repository
            .expect_insert()
            .times(1)
            .returning(|account| {
                Err(AccountError::DuplicateUsername(
                    account.username.as_str().to_string(),
                ))
            });

        let result = service(repository)
            .register(credentials("alice", "pw1"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::DuplicateUsername(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success_token_resolves_to_account() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(7, "alice", "pw1");

        repository
            .expect_find_by_username()
            .withf(|username| username.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let token = service(repository)
            .login(credentials("alice", "pw1"))
            .await
            .unwrap();

        let gate = AuthorizationGate::new(&token_config());
        let credential = format!("Bearer {}", token);
        assert_eq!(gate.authenticate(Some(&credential), Utc::now()), Ok(7));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account(7, "alice", "pw1");

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let result = service(repository)
            .login(credentials("alice", "wrong"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository)
            .login(credentials("nobody", "x"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_username_runs_password_verification() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let mut service = service(repository);
        assert!(service.dummy_hash.starts_with("$argon2id$"));

        // An unusable placeholder surfaces as a hashing error only if it is verified.
        service.dummy_hash = "not-a-phc-string".to_string();

        let result = service.login(credentials("nobody", "x")).await;

        assert!(matches!(result.unwrap_err(), AccountError::Hashing(_)));
    }

    #[tokio::test]
    async fn test_login_corrupt_stored_hash() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_find_by_username().times(1).returning(|_| {
            Ok(Some(Account {
                id: AccountId(3),
                username: Username::new("carol".to_string()).unwrap(),
                password_hash: "not-a-phc-string".to_string(),
                created_at: Utc::now(),
            }))
        });

        let result = service(repository)
            .login(credentials("carol", "pw"))
            .await;

        assert!(matches!(result.unwrap_err(), AccountError::Hashing(_)));
    }

    #[tokio::test]
    async fn test_database_error_propagates() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("connection reset".to_string())));

        let result = service(repository)
            .login(credentials("alice", "pw1"))
            .await;

        assert!(matches!(result.unwrap_err(), AccountError::DatabaseError(_)));
    }
}
