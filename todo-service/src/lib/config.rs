use std::env;

use auth::TokenConfig;
use auth::TokenConfigError;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        5
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    #[serde(default = "JwtConfig::default_issuer")]
    pub issuer: String,
}

impl JwtConfig {
    fn default_issuer() -> String {
        TokenConfig::DEFAULT_ISSUER.to_string()
    }

    /// Build the immutable signing configuration shared by issuance and verification.
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret shorter than 32 bytes
    /// * `NonPositiveTtl` - `expiration_hours` is zero or negative
    /// * `TtlTooLong` - `expiration_hours` is above one year
    /// * `EmptyIssuer` - Issuer is blank
    pub fn token_config(&self) -> Result<TokenConfig, TokenConfigError> {
        let ttl = Duration::try_hours(self.expiration_hours).ok_or(TokenConfigError::TtlTooLong {
            max_hours: TokenConfig::MAX_TTL_HOURS,
        })?;

        TokenConfig::new(self.secret.as_bytes(), ttl, self.issuer.as_str())
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(secret: &str, expiration_hours: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiration_hours,
            issuer: JwtConfig::default_issuer(),
        }
    }

    #[test]
    fn test_token_config() {
        let token_config = jwt_config("test-secret-key-for-jwt-signing-at-least-32-bytes", 24)
            .token_config()
            .unwrap();

        assert_eq!(token_config.ttl(), Duration::hours(24));
        assert_eq!(token_config.issuer(), "todo-service");
    }

    #[test]
    fn test_token_config_rejects_short_secret() {
        let result = jwt_config("too-short", 24).token_config();
        assert!(matches!(
            result,
            Err(TokenConfigError::SecretTooShort { .. })
        ));
    }

    #[test]
    fn test_token_config_rejects_huge_expiration() {
        let secret = "test-secret-key-for-jwt-signing-at-least-32-bytes";

        for hours in [i64::MAX, 24 * 366] {
            let result = jwt_config(secret, hours).token_config();
            assert!(matches!(
                result,
                Err(TokenConfigError::TtlTooLong { max_hours: 8760 })
            ));
        }
    }

    #[test]
    fn test_jwt_config_debug_hides_secret() {
        let rendered = format!("{:?}", jwt_config("super-secret-value-that-is-long-enough", 1));
        assert!(!rendered.contains("super-secret"));
    }
}
