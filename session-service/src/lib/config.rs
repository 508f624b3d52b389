use std::env;

use chrono::Duration;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

use crate::session::models::RefreshPolicy;
use crate::session::models::SessionSettings;
use crate::session::models::DEFAULT_REFRESH_TOKEN_TTL_DAYS;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub refresh_token: RefreshTokenConfig,
    pub api_key: ApiKeyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_seconds")]
    pub expiration_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshTokenConfig {
    #[serde(default = "default_refresh_token_days")]
    pub expiration_days: i64,
    #[serde(default)]
    pub policy: RefreshPolicy,
}

#[derive(Deserialize, Clone)]
pub struct ApiKeyConfig {
    pub key: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_seconds() -> i64 {
    auth::jwt::DEFAULT_ACCESS_TOKEN_TTL_SECONDS
}

fn default_refresh_token_days() -> i64 {
    DEFAULT_REFRESH_TOKEN_TTL_DAYS
}

impl Default for RefreshTokenConfig {
    fn default() -> Self {
        Self {
            expiration_days: default_refresh_token_days(),
            policy: RefreshPolicy::default(),
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_seconds", &self.expiration_seconds)
            .finish()
    }
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    /// Access token lifetime, rejected unless positive and representable.
    pub fn access_token_ttl(&self) -> Result<Duration, ConfigError> {
        checked_ttl(
            "jwt.expiration_seconds",
            Duration::try_seconds(self.expiration_seconds),
        )
    }
}

impl RefreshTokenConfig {
    /// Refresh token lifetime, rejected unless positive and representable.
    pub fn refresh_token_ttl(&self) -> Result<Duration, ConfigError> {
        checked_ttl(
            "refresh_token.expiration_days",
            Duration::try_days(self.expiration_days),
        )
    }
}

// Expiries are computed as `now + ttl`, which must not overflow.
fn checked_ttl(key: &str, ttl: Option<Duration>) -> Result<Duration, ConfigError> {
    ttl.filter(|ttl| *ttl > Duration::zero() && Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| ConfigError::Message(format!("{} is out of range", key)))
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, API_KEY__KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize::<Self>()?.validated()
    }

    /// Parse configuration from a TOML document, without files or environment.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.jwt.access_token_ttl()?;
        self.refresh_token.refresh_token_ttl()?;
        Ok(self)
    }
}

impl TryFrom<&Config> for SessionSettings {
    type Error = ConfigError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        Ok(
            SessionSettings::new(config.jwt.secret.clone(), config.api_key.key.clone())
                .with_access_token_ttl(config.jwt.access_token_ttl()?)
                .with_refresh_token_ttl(config.refresh_token.refresh_token_ttl()?)
                .with_refresh_policy(config.refresh_token.policy),
        )
    }
}
