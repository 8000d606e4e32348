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
    pub jwt: JwtConfig,
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
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Upper bound on token lifetime: one year.
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    24
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// The result is validated; a missing signing secret is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot safely start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret is required (set JWT__SECRET)".to_string(),
            ));
        }

        if self.jwt.expiration_hours <= 0 || self.jwt.expiration_hours > MAX_EXPIRATION_HOURS {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.jwt.expiration_hours
            )));
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "database.url is required (set DATABASE__URL)".to_string(),
            ));
        }

        Ok(())
    }
}
