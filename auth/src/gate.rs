use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::jwt::JwtHandler;
use crate::jwt::TokenConfig;

/// Literal that must precede the token in an `Authorization` credential.
pub const BEARER_PREFIX: &str = "Bearer ";

/// The single rejection the gate exposes.
///
/// Missing, malformed, forged and expired credentials are indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unauthenticated")]
pub struct Unauthenticated;

/// Converts an inbound bearer credential into the caller's account id.
///
/// Pure: no I/O and no state besides the verification key.
#[derive(Clone)]
pub struct AuthorizationGate {
    jwt_handler: JwtHandler,
}

impl AuthorizationGate {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            jwt_handler: JwtHandler::new(config),
        }
    }

    /// Authenticate a raw credential at instant `now`.
    ///
    /// # Arguments
    /// * `credential` - Raw `Authorization` value, if the request carried one
    /// * `now` - Verification instant
    ///
    /// # Returns
    /// Account id recovered from the verified claims
    ///
    /// # Errors
    /// * `Unauthenticated` - Absent credential, missing scheme, empty token,
    ///   or any token verification failure
    pub fn authenticate(
        &self,
        credential: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<i64, Unauthenticated> {
        let token = credential.and_then(bearer_token).ok_or(Unauthenticated)?;

        let claims = self.jwt_handler.verify(token, now).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            Unauthenticated
        })?;

        Ok(claims.user_id)
    }
}

/// Strip the bearer scheme, returning `None` when it is absent or the token is empty.
pub fn bearer_token(credential: &str) -> Option<&str> {
    credential
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
