use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub access_token: AccessTokenConfig,
    pub refresh_token: RefreshTokenConfig,
    #[serde(default)]
    pub password_reset: PasswordResetConfig,
    pub kafka: KafkaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Externally reachable base URL of the auth API, used in confirmation links.
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Frontend origin; allowed by CORS and used in password reset links.
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessTokenConfig {
    pub secret: String,
    pub expiry_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshTokenConfig {
    pub secret: String,
    pub expiry_days: i64,
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordResetConfig {
    pub expiry_minutes: i64,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self { expiry_minutes: 15 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    pub mail_topic: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_purge_interval_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, ACCESS_TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        // Example: REFRESH_TOKEN__SECRET=... overrides refresh_token.secret
        Self::load_from("config", &run_mode, Environment::default().separator("__"))
    }

    fn load_from(dir: &str, run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let config: Config = ConfigBuilder::builder()
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_token.purge_interval_secs == 0 {
            return Err(ConfigError::Message(
                "refresh_token.purge_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
