//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SECRET_KEY` - Session cookie signing secret
//!
//! ## Database
//! - `DATABASE_USER` - Database user
//! - `DATABASE_PASSWORD` - Database password
//! - `DATABASE_HOST` - Database host
//! - `DATABASE_PORT` - Database port
//! - `DATABASE_NAME` - Database name
//!
//! Missing database values are not rejected here. They are left unset on the
//! driver's connect options, so the driver's own defaults and connection
//! errors apply.
//!
//! ## Optional
//! - `VITRINE_HOST` - Bind address (default: 127.0.0.1)
//! - `VITRINE_PORT` - Listen port (default: 5000)
//! - `VITRINE_BASE_URL` - Public URL; `https://` turns on secure cookies
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Session signing secret
    pub secret_key: SecretString,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Database connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub user: Option<String>,
    pub password: Option<SecretString>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SECRET_KEY` is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SECRET_KEY` is missing or a value fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_key = get_required_secret(&lookup, "SECRET_KEY")?;
        let host = get_env_or_default(&lookup, "VITRINE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VITRINE_HOST".to_string(), e.to_string()))?;
        let port = parse_env_or_default(&lookup, "VITRINE_PORT", 5000_u16)?;
        let base_url =
            lookup("VITRINE_BASE_URL").unwrap_or_else(|| format!("http://{host}:{port}"));

        Ok(Self {
            host,
            port,
            base_url,
            secret_key,
            database: DatabaseConfig::from_lookup(&lookup)?,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default(&lookup, "SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_env_or_default(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                0.0,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl DatabaseConfig {
    /// Load database settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `DATABASE_PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("DATABASE_PORT")
            .map(|value| {
                value.parse::<u16>().map_err(|e| {
                    ConfigError::InvalidEnvVar("DATABASE_PORT".to_string(), e.to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            user: lookup("DATABASE_USER"),
            password: lookup("DATABASE_PASSWORD").map(SecretString::from),
            host: lookup("DATABASE_HOST"),
            port,
            name: lookup("DATABASE_NAME"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required, non-empty variable as a secret.
fn get_required_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<SecretString, ConfigError> {
    let value = lookup(key)
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;

    if value.expose_secret().trim().is_empty() {
        return Err(ConfigError::MissingEnvVar(key.to_string()));
    }

    Ok(value)
}

/// Get a variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Parse a variable, falling back to a default when unset.
fn parse_env_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
