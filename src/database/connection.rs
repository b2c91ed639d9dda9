//! Connection provider.
//!
//! Every handler opens exactly one connection per call and hands it back
//! through [`ConnectionFactory::release`]. A connection dropped without being
//! released (cancelled request, early return) is closed by its destructor.

use std::str::FromStr;

use async_trait::async_trait;
use log::{debug, warn};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;

use crate::errors::ApiError;

#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    /// Open a new connection to the store.
    async fn create_connection(&self) -> Result<SqliteConnection, ApiError>;

    /// Close a connection obtained from [`ConnectionFactory::create_connection`].
    async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }
    }
}

/// Opens SQLite connections from a fixed set of connect options.
#[derive(Debug, Clone)]
pub struct SqliteConnectionFactory {
    options: SqliteConnectOptions,
}

impl SqliteConnectionFactory {
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    /// Build a factory from a connection string such as `sqlite://users.db`.
    pub fn from_url(url: &str) -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::from_str(url)?;
        Ok(Self::new(options))
    }

    pub fn options(&self) -> &SqliteConnectOptions {
        &self.options
    }
}

#[async_trait]
impl ConnectionFactory for SqliteConnectionFactory {
    async fn create_connection(&self) -> Result<SqliteConnection, ApiError> {
        debug!("Opening database connection");
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }
}
