use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::PasswordInputError;
use crate::account::errors::UsernameError;

/// Account aggregate entity.
///
/// The password hash never leaves the domain; HTTP responses are built from
/// the id, username and creation time only.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account identifier assigned by the store at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Case-sensitive and immutable once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid username.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Returns
    /// Validated Username value object
    ///
    /// # Errors
    /// * `Empty` - Username is empty
    /// * `TooLong` - Username longer than 64 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as received from the caller.
///
/// Debug output is redacted so the value cannot end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    /// # Errors
    /// * `Empty` - Password is empty
    pub fn new(password: String) -> Result<Self, PasswordInputError> {
        if password.is_empty() {
            Err(PasswordInputError::Empty)
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

/// Account data handed to the store; the store assigns id and creation time.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub password_hash: String,
}

/// Command carrying validated credentials, used for both registration and login.
#[derive(Debug)]
pub struct CredentialsCommand {
    pub username: Username,
    pub password: PlainPassword,
}

impl CredentialsCommand {
    pub fn new(username: Username, password: PlainPassword) -> Self {
        Self { username, password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        let username = Username::new("alice".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn test_username_is_case_sensitive() {
        let lower = Username::new("alice".to_string()).unwrap();
        let upper = Username::new("Alice".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_username_empty() {
        assert_eq!(Username::new(String::new()), Err(UsernameError::Empty));
    }

    #[test]
    fn test_username_too_long() {
        let result = Username::new("a".repeat(65));
        assert_eq!(
            result,
            Err(UsernameError::TooLong {
                max: 64,
                actual: 65
            })
        );
    }

    #[test]
    fn test_password_empty() {
        assert_eq!(
            PlainPassword::new(String::new()),
            Err(PasswordInputError::Empty)
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = PlainPassword::new("pw1".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("pw1"));
    }
}
