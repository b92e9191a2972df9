//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `HTTP_USER` / `HTTP_PASSWORD` - Credentials for `POST /url`
//!
//! ## Optional Variables
//!
//! - `APP_ENV` - `local`, `dev` or `prod` (default: `prod`)
//! - `STORAGE_PATH` - SQLite database file (default: `./storage/storage.db`)
//! - `LISTEN` - Bind address (default: `localhost:8082`)
//! - `HTTP_TIMEOUT_SECS` - Per-request timeout (default: 4)
//! - `SHUTDOWN_TIMEOUT_SECS` - Drain window on shutdown (default: 10)
//! - `ALIAS_LENGTH` - Generated alias length (default: 6)
//! - `ALIAS_MAX_ATTEMPTS` - Allocation attempts before giving up (default: 5)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)
//! - `RUST_LOG` - Overrides the log filter chosen by `APP_ENV`

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::alias_allocator::DEFAULT_MAX_ATTEMPTS;
use crate::utils::alias::{DEFAULT_ALIAS_LENGTH, MAX_ALIAS_LENGTH};

/// Deployment environment; selects the logging preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    /// Unknown values map to [`Environment::Prod`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "local" => Environment::Local,
            "dev" => Environment::Dev,
            _ => Environment::Prod,
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        })
    }
}

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub env: Environment,
    pub storage_path: String,
    pub listen_addr: String,
    /// Upper bound on handling a single request, in seconds.
    pub http_timeout_secs: u64,
    /// Connections with no traffic for this long are closed, in seconds.
    pub http_idle_timeout_secs: u64,
    /// Drain window after a termination signal, in seconds.
    pub shutdown_timeout_secs: u64,
    pub http_user: String,
    pub http_password: String,
    pub alias_length: usize,
    pub alias_max_attempts: usize,
    pub db_max_connections: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("env", &self.env)
            .field("storage_path", &self.storage_path)
            .field("listen_addr", &self.listen_addr)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_idle_timeout_secs", &self.http_idle_timeout_secs)
            .field("shutdown_timeout_secs", &self.shutdown_timeout_secs)
            .field("http_user", &self.http_user)
            .field("http_password", &"***")
            .field("alias_length", &self.alias_length)
            .field("alias_max_attempts", &self.alias_max_attempts)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are missing or a numeric variable
    /// does not parse.
    pub fn from_env() -> Result<Self> {
        let app_env = env::var("APP_ENV")
            .unwrap_or_default()
            .parse()
            .unwrap_or(Environment::Prod);

        let storage_path =
            env::var("STORAGE_PATH").unwrap_or_else(|_| "./storage/storage.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "localhost:8082".to_string());

        let http_user = env::var("HTTP_USER").context("HTTP_USER must be set")?;
        let http_password = env::var("HTTP_PASSWORD").context("HTTP_PASSWORD must be set")?;

        Ok(Self {
            env: app_env,
            storage_path,
            listen_addr,
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", 4)?,
            http_idle_timeout_secs: parse_var("HTTP_IDLE_TIMEOUT_SECS", 60)?,
            shutdown_timeout_secs: parse_var("SHUTDOWN_TIMEOUT_SECS", 10)?,
            http_user,
            http_password,
            alias_length: parse_var("ALIAS_LENGTH", DEFAULT_ALIAS_LENGTH)?,
            alias_max_attempts: parse_var("ALIAS_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `storage_path` or `http_user` is empty
    /// - a timeout is zero, or the idle timeout is shorter than the request timeout
    /// - `alias_length` is outside 1-64 or `alias_max_attempts` outside 1-100
    /// - `db_max_connections` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.storage_path.trim().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        if self.http_user.is_empty() {
            anyhow::bail!("HTTP_USER must not be empty");
        }

        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }

        if self.http_idle_timeout_secs < self.http_timeout_secs {
            anyhow::bail!(
                "HTTP_IDLE_TIMEOUT_SECS ({}) must not be shorter than HTTP_TIMEOUT_SECS ({})",
                self.http_idle_timeout_secs,
                self.http_timeout_secs
            );
        }

        if self.shutdown_timeout_secs == 0 {
            anyhow::bail!("SHUTDOWN_TIMEOUT_SECS must be greater than 0");
        }

        if self.alias_length == 0 || self.alias_length > MAX_ALIAS_LENGTH {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and {}, got {}",
                MAX_ALIAS_LENGTH,
                self.alias_length
            );
        }

        if self.alias_max_attempts == 0 || self.alias_max_attempts > 100 {
            anyhow::bail!(
                "ALIAS_MAX_ATTEMPTS must be between 1 and 100, got {}",
                self.alias_max_attempts
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.http_idle_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Logs a configuration summary (without the password).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env);
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Storage: {}", self.storage_path);
        tracing::info!("  Request timeout: {}s", self.http_timeout_secs);
        tracing::info!("  Idle timeout: {}s", self.http_idle_timeout_secs);
        tracing::info!("  Shutdown timeout: {}s", self.shutdown_timeout_secs);
        tracing::info!("  Write user: {}", self.http_user);
        tracing::info!(
            "  Aliases: length {}, {} attempts",
            self.alias_length,
            self.alias_max_attempts
        );
    }
}

/// Reads and parses an optional variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
