use std::fmt;

use chrono::Duration;

use super::errors::TokenConfigError;

/// Immutable signing configuration shared by token issuance and verification.
///
/// Built once at process start from external configuration. Replacing the
/// secret invalidates every token issued under the previous one.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    ttl: Duration,
    issuer: String,
}

impl TokenConfig {
    /// Minimum secret length for HS256 (256 bits).
    pub const MIN_SECRET_LENGTH: usize = 32;

    pub const DEFAULT_ISSUER: &'static str = "todo-service";

    /// Longest accepted token lifetime (one year).
    pub const MAX_TTL_HOURS: i64 = 365 * 24;

    /// Build a validated token configuration.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret, at least 32 bytes
    /// * `ttl` - Lifetime of issued tokens
    /// * `issuer` - Issuer tag stamped into and required from every token
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret shorter than 32 bytes
    /// * `NonPositiveTtl` - Zero or negative lifetime
    /// * `TtlTooLong` - Lifetime longer than `MAX_TTL_HOURS`
    /// * `EmptyIssuer` - Issuer tag is empty
    pub fn new(
        secret: impl Into<Vec<u8>>,
        ttl: Duration,
        issuer: impl Into<String>,
    ) -> Result<Self, TokenConfigError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(TokenConfigError::SecretTooShort {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }
        if ttl <= Duration::zero() {
            return Err(TokenConfigError::NonPositiveTtl);
        }
        if ttl.num_hours() > Self::MAX_TTL_HOURS {
            return Err(TokenConfigError::TtlTooLong {
                max_hours: Self::MAX_TTL_HOURS,
            });
        }

        let issuer = issuer.into();
        if issuer.is_empty() {
            return Err(TokenConfigError::EmptyIssuer);
        }

        Ok(Self {
            secret,
            ttl,
            issuer,
        })
    }

    /// Configuration with a 24 hour lifetime and the default issuer.
    pub fn with_defaults(secret: impl Into<Vec<u8>>) -> Result<Self, TokenConfigError> {
        Self::new(secret, Duration::hours(24), Self::DEFAULT_ISSUER)
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}

// Keep the secret out of logs.
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("issuer", &self.issuer)
            .finish()
    }
}
