use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::config::TokenConfig;
use super::errors::TokenError;

/// JWT token handler for issuing and verifying session tokens.
///
/// Stateless beyond the signing keys: no issued token is remembered, so there
/// is no revocation and a leaked token stays valid until it expires.
/// Uses HS256 (HMAC with SHA-256).
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    issuer: String,
}

impl JwtHandler {
    /// Create a new JWT handler from an immutable token configuration.
    ///
    /// # Arguments
    /// * `config` - Validated signing secret, lifetime and issuer
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            algorithm: Algorithm::HS256,
            ttl: config.ttl(),
            issuer: config.issuer().to_string(),
        }
    }

    /// Issue a signed token for an account.
    ///
    /// # Arguments
    /// * `user_id` - Account identifier to embed
    /// * `now` - Issuance instant; expiration is `now + ttl`
    ///
    /// # Returns
    /// Opaque JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or `now + ttl` is out of range
    pub fn issue(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = SessionClaims::issue(user_id, now, self.ttl, &self.issuer).ok_or_else(|| {
            TokenError::EncodingFailed("expiration out of range".to_string())
        })?;
        self.encode(&claims)
    }

    /// Encode arbitrary session claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token at instant `now`.
    ///
    /// # Arguments
    /// * `token` - JWT token string to verify
    /// * `now` - Verification instant
    ///
    /// # Returns
    /// Verified session claims
    ///
    /// # Errors
    /// * `Malformed` - Not a token, unexpected algorithm, bad payload or wrong issuer
    /// * `BadSignature` - Signature does not match the configured secret
    /// * `Expired` - `now` is at or past the expiration
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock below.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.set_issuer(&[self.issuer.as_str()]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
