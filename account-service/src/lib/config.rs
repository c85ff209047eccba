use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for account-service.
///
/// Loaded once at startup and read-only afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// `secret` must stay the same for as long as issued access tokens must validate.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: i64,
    #[serde(default = "default_refresh_token_validity_days")]
    pub refresh_token_validity_days: i64,
}

/// Payment provider webhook configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

/// Upper bound keeping refresh token expiry timestamps representable.
const MAX_REFRESH_TOKEN_VALIDITY_DAYS: i64 = 36_500;

impl JwtConfig {
    /// Default access token lifetime, within `1..=3600` seconds.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Value out of range
    pub fn access_token_ttl(&self) -> Result<Duration, ConfigError> {
        let seconds = self.access_token_ttl_seconds;
        if !(1..=auth::jwt::MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_seconds must be between 1 and {}, got {}",
                auth::jwt::MAX_ACCESS_TOKEN_TTL_SECONDS,
                seconds
            )));
        }
        Ok(Duration::seconds(seconds))
    }

    /// Refresh token validity window, within `1..=36500` days.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Value out of range
    pub fn refresh_token_validity(&self) -> Result<Duration, ConfigError> {
        let days = self.refresh_token_validity_days;
        Some(days)
            .filter(|days| (1..=MAX_REFRESH_TOKEN_VALIDITY_DAYS).contains(days))
            .and_then(Duration::try_days)
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "jwt.refresh_token_validity_days must be between 1 and {}, got {}",
                    MAX_REFRESH_TOKEN_VALIDITY_DAYS, days
                ))
            })
    }
}

fn default_access_token_ttl_seconds() -> i64 {
    auth::jwt::MAX_ACCESS_TOKEN_TTL_SECONDS
}

fn default_refresh_token_validity_days() -> i64 {
    auth::refresh::REFRESH_TOKEN_VALIDITY_DAYS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, POLKA__API_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.access_token_ttl()?;
        config.jwt.refresh_token_validity()?;

        Ok(config)
    }
}
