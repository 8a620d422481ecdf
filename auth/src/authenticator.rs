use chrono::DateTime;
use chrono::Utc;

use crate::jwt::JwtHandler;
use crate::jwt::TokenConfig;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no per-user state; the caller supplies the stored hash it looked up.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Immutable token signing configuration
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(config),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `user_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Account the token is issued for
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(user_id, now)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Check a password against a stored hash without issuing anything.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }
}
