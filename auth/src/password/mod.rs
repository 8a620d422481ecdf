//! Credential hashing (Argon2id, PHC strings).

pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
