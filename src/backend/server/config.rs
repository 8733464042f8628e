/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Applied in order, later sources winning:
 *
 * 1. Built-in defaults (production, port 5000, `freelance-hub.db`)
 * 2. Optional TOML file named by `FREELANCE_HUB_CONFIG`
 * 3. Environment variables (`APP_ENV`, `HOST`, `PORT`, `DATABASE_URL`,
 *    `DB_MAX_CONNECTIONS`, `JWT_SECRET`, `UPLOAD_DIR`, `BCRYPT_COST`)
 *
 * Environment access goes through a lookup closure, so tests can load a
 * configuration without touching the process environment.
 *
 * # Error Handling
 *
 * Unlike optional services, a bad configuration stops startup: an
 * unparsable value, a bcrypt cost outside 4..=31, or a missing `JWT_SECRET`
 * are all `ConfigError`s.
 *
 * # Development Mode
 *
 * Only `APP_ENV=development` (or `environment = "development"` in the
 * file) relaxes the defaults: internal error detail is added to 500
 * responses and a fixed signing secret stands in for `JWT_SECRET`. An
 * unset environment is production.
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::sessions::JwtSecret;

/// Environment variable naming an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "FREELANCE_HUB_CONFIG";

/// Signing secret used when a development server has no `JWT_SECRET`
const DEV_JWT_SECRET: &str = "freelance-hub-development-secret";

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("JWT_SECRET must be set unless APP_ENV=development")]
    MissingJwtSecret,

    #[error("bcrypt cost {0} is outside {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}")]
    InvalidBcryptCost(u32),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// HS256 signing secret shared by every instance
    pub jwt_secret: Option<JwtSecret>,
    /// Directory for freelancer uploads, served at `/uploads`
    pub upload_dir: PathBuf,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "sqlite://freelance-hub.db?mode=rwc".to_string(),
            max_connections: 5,
            jwt_secret: None,
            upload_dir: PathBuf::from("uploads"),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

fn parse_env<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` for environment access
    ///
    /// # Example
    ///
    /// ```rust
    /// use freelance_hub::backend::server::config::ServerConfig;
    ///
    /// let config = ServerConfig::from_lookup(|key| match key {
    ///     "PORT" => Some("8080".to_string()),
    ///     "JWT_SECRET" => Some("change-me".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.port, 8080);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_ENV) {
            Some(path) => Self::from_toml_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file; missing keys take their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("APP_ENV") {
            self.environment = value.parse()?;
        }
        if let Some(value) = lookup("HOST") {
            self.host = value;
        }
        if let Some(value) = lookup("PORT") {
            self.port = parse_env("PORT", value)?;
        }
        if let Some(value) = lookup("DATABASE_URL") {
            self.database_url = value;
        }
        if let Some(value) = lookup("DB_MAX_CONNECTIONS") {
            self.max_connections = parse_env("DB_MAX_CONNECTIONS", value)?;
        }
        if let Some(value) = lookup("JWT_SECRET") {
            self.jwt_secret = Some(JwtSecret::new(value));
        }
        if let Some(value) = lookup("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_env("BCRYPT_COST", value)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(self.bcrypt_cost));
        }
        if !self.is_development() && !self.has_jwt_secret() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(())
    }

    fn has_jwt_secret(&self) -> bool {
        self.jwt_secret.as_ref().is_some_and(|secret| !secret.is_empty())
    }

    fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Signing secret, falling back to a fixed value only in development
    pub fn jwt_secret(&self) -> Result<JwtSecret, ConfigError> {
        match &self.jwt_secret {
            Some(secret) if self.has_jwt_secret() => Ok(secret.clone()),
            _ if self.is_development() => {
                tracing::warn!("JWT_SECRET not set. Using the development signing secret.");
                Ok(JwtSecret::new(DEV_JWT_SECRET))
            }
            _ => Err(ConfigError::MissingJwtSecret),
        }
    }

    /// Whether internal error detail is included in responses
    pub fn expose_error_details(&self) -> bool {
        self.is_development()
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Open the SQLite pool and run the embedded migrations
///
/// In-memory databases live only as long as their connection, so for
/// `:memory:` URLs pooled connections are never retired.
///
/// # Arguments
///
/// * `database_url` - sqlx SQLite URL, e.g. `sqlite://freelance-hub.db?mode=rwc`
/// * `max_connections` - Pool size
pub async fn connect_database(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
    if database_url.contains(":memory:") {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    tracing::info!("Connecting to database...");
    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
