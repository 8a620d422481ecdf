//! Authentication utilities library
//!
//! Provides the credential and session layer of the task service:
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS256 JWT)
//! - Authentication coordination
//! - The authorization gate that turns a bearer credential into an account id
//!
//! The signing secret is supplied once through an immutable [`TokenConfig`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, TokenConfig};
//! use chrono::Utc;
//!
//! let config = TokenConfig::with_defaults("secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&config);
//! let token = handler.issue(42, Utc::now()).unwrap();
//! let claims = handler.verify(&token, Utc::now()).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthorizationGate, Authenticator, TokenConfig};
//! use chrono::Utc;
//!
//! let config = TokenConfig::with_defaults("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&config);
//! let gate = AuthorizationGate::new(&config);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 7, Utc::now()).unwrap();
//!
//! // Protected request: recover the account id from the bearer credential
//! let credential = format!("Bearer {}", result.access_token);
//! assert_eq!(gate.authenticate(Some(&credential), Utc::now()), Ok(7));
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AuthorizationGate;
pub use gate::Unauthenticated;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use jwt::TokenConfig;
pub use jwt::TokenConfigError;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
