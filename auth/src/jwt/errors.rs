use thiserror::Error;

/// Error type for token verification and issuance.
///
/// Verification failures are deliberately coarse: callers at the HTTP edge
/// collapse all of them into a single unauthenticated outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Error for building a token configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenConfigError {
    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Token lifetime must be positive")]
    NonPositiveTtl,

    #[error("Token lifetime too long: maximum {max_hours} hours")]
    TtlTooLong { max_hours: i64 },

    #[error("Token issuer is empty")]
    EmptyIssuer,
}
