use std::env;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

/// Secret used to sign tokens when running locally without `JWT_SECRET`.
pub const LOCAL_JWT_SECRET: &str = "mygram-local-development-secret";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and
/// shared read-only with every request through `AppState` (pulled out via `FromRef`).
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls `.env` loading, log format and secret fallback.
    pub env: Env,
    // Discrete connection parameters for the Postgres store.
    pub database: DatabaseConfig,
    // HMAC secret used to sign and verify session tokens.
    pub jwt_secret: String,
    // TCP port the HTTP server binds to.
    pub port: u16,
}

/// Env
///
/// The startup toggle distinguishing a production deployment from local development.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Env {
    /// Reads the `ENV` variable. `prd` and `production` select Production; anything else,
    /// including an unset variable, is Local.
    pub fn from_env() -> Self {
        match env::var("ENV").as_deref() {
            Ok("prd") | Ok("production") => Env::Production,
            _ => Env::Local,
        }
    }
}

/// DatabaseConfig
///
/// Connection parameters for the persistence gateway, read from `DB_*` variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Builds sqlx connection options. TLS is disabled, matching the plain
    /// `sslmode=disable` deployments this service runs against.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid port: {value}")]
    InvalidPort { name: &'static str, value: String },
}

impl Default for AppConfig {
    /// Provides a non-panicking configuration for test scaffolding, so state can be
    /// built without touching the process environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: "postgres".to_string(),
                name: "mygram_test".to_string(),
            },
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the full configuration from environment variables, taking the runtime
    /// environment from `ENV`.
    ///
    /// # Errors
    /// Fails when a required variable is missing (`DB_USER`, `DB_NAME`, and `JWT_SECRET`
    /// in Production) or a port variable does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Env::from_env())
    }

    /// Same as [`AppConfig::load`], for an environment already decided by the caller.
    /// `ENV` is not read again, so a `.env` loaded afterwards cannot change the mode.
    pub fn load_for(env: Env) -> Result<Self, ConfigError> {
        let jwt_secret = match env {
            Env::Production => required("JWT_SECRET")?,
            Env::Local => optional("JWT_SECRET").unwrap_or_else(|| LOCAL_JWT_SECRET.to_string()),
        };

        let database = DatabaseConfig {
            host: optional("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: port_var("DB_PORT", 5432)?,
            user: required("DB_USER")?,
            password: optional("DB_PASSWORD").unwrap_or_default(),
            name: required("DB_NAME")?,
        };

        Ok(Self {
            env,
            database,
            jwt_secret,
            port: port_var("PORT", DEFAULT_PORT)?,
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn port_var(name: &'static str, default: u16) -> Result<u16, ConfigError> {
    match optional(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidPort { name, value }),
        None => Ok(default),
    }
}
