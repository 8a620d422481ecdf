use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username is required")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for plaintext password input validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("password is required")]
    Empty,
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordInputError),

    // Domain-level errors
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Unknown username and wrong password share this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
