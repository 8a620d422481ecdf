use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session claims carried by every access token.
///
/// Never persisted; rebuilt from the token string on every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the account that owns the session
    pub user_id: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl SessionClaims {
    /// Create claims for an account, valid from `now` for `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Account identifier
    /// * `now` - Issuance instant
    /// * `ttl` - Token lifetime
    /// * `issuer` - Issuer tag
    ///
    /// # Returns
    /// Claims with iat, exp and iss set, or `None` if `now + ttl` is out of range
    pub fn issue(user_id: i64, now: DateTime<Utc>, ttl: Duration, issuer: &str) -> Option<Self> {
        let exp = now.checked_add_signed(ttl)?;

        Some(Self {
            user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: issuer.to_string(),
        })
    }

    /// Check if the claims are expired at `now`.
    ///
    /// A token is valid only while expiration is strictly in the future, so the
    /// expiration instant itself already counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_issue() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = SessionClaims::issue(42, now, Duration::hours(24), "todo-service").unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.iss, "todo-service");
    }

    #[test]
    fn test_is_expired() {
        let issued = Utc.timestamp_opt(1000, 0).unwrap();
        let claims = SessionClaims::issue(1, issued, Duration::seconds(10), "test").unwrap();

        assert!(!claims.is_expired(Utc.timestamp_opt(1009, 0).unwrap()));
        assert!(claims.is_expired(Utc.timestamp_opt(1010, 0).unwrap())); // Exactly at expiration
        assert!(claims.is_expired(Utc.timestamp_opt(1011, 0).unwrap()));
    }

    #[test]
    fn test_issue_expiration_out_of_range() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let ttl = Duration::try_days(100_000_000).unwrap();

        assert!(SessionClaims::issue(1, now, ttl, "todo-service").is_none());
    }
}
