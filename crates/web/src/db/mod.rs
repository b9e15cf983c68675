//! Database operations for the catalog `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `produto` - Products (`id`, `nome`, `descricao`, `preco`)
//! - `users` - Site authentication (`id`, `name`, `email`, `password`)
//!
//! The schema lives in `crates/web/sql/schema.sql` and is applied by the
//! operator; the application never alters it.
//!
//! # Connections
//!
//! Every repository operation opens its own connection through
//! [`ConnectionProvider`] and drops it when the operation returns. Nothing is
//! pooled or shared between requests.

pub mod products;
pub mod users;

use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use products::{ProductRepository, ProductStore};
pub use users::{UserRepository, UserStore};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Opening a connection failed.
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Opens short-lived database connections.
///
/// Cheap to clone; holds only the connect options built from configuration.
///
/// Implements `Debug` manually to keep the password out of logs.
#[derive(Clone)]
pub struct ConnectionProvider {
    options: PgConnectOptions,
}

impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("username", &self.options.get_username())
            .field("database", &self.options.get_database())
            .finish_non_exhaustive()
    }
}

impl ConnectionProvider {
    /// Build a provider from database settings.
    ///
    /// Unset values are left to the driver's defaults (`PG*` variables, then
    /// libpq conventions).
    #[must_use]
    pub fn new(config: &DatabaseConfig) -> Self {
        let mut options = PgConnectOptions::new();

        if let Some(host) = &config.host {
            options = options.host(host);
        }
        if let Some(port) = config.port {
            options = options.port(port);
        }
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password.expose_secret());
        }
        if let Some(name) = &config.name {
            options = options.database(name);
        }

        Self { options }
    }

    /// Open a new connection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Connection` if the connection cannot be
    /// established. The cause is logged before returning.
    pub async fn open(&self) -> Result<PgConnection, RepositoryError> {
        self.options.connect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            RepositoryError::Connection(e)
        })
    }

    /// Open a connection, run `SELECT 1`, and close it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database cannot be reached.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        let mut conn = self.open().await?;
        sqlx::query("SELECT 1").execute(&mut conn).await?;
        conn.close().await?;
        Ok(())
    }
}
