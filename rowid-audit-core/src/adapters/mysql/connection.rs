//! MySQL/TiDB connection setup.
//!
//! The audit runs over one connection opened eagerly at startup, so an
//! unreachable server or bad credentials fail the run before any schema is
//! touched.

use super::{ConnectionConfig, MySqlAdapter};
use crate::Result;
use crate::error::RowIdAuditError;
use crate::security::Credentials;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

impl MySqlAdapter {
    /// Opens the audit session.
    ///
    /// # Errors
    /// Returns error if:
    /// - The configuration is invalid
    /// - The server cannot be reached or rejects the credentials
    pub async fn connect(config: ConnectionConfig, credentials: &Credentials) -> Result<Self> {
        config.validate()?;

        let options = build_connect_options(&config, credentials);

        tracing::debug!("Connecting to {}", config);
        let pool = create_connection_pool(options, &config).await?;

        Ok(Self { pool, config })
    }

    /// Wraps an existing pool.
    pub const fn from_pool(pool: MySqlPool, config: ConnectionConfig) -> Self {
        Self { pool, config }
    }

    /// Closes the session gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Builds driver options from the connection config and credentials.
pub(crate) fn build_connect_options(
    config: &ConnectionConfig,
    credentials: &Credentials,
) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(credentials.username());

    if let Some(password) = credentials.password() {
        options = options.password(password);
    }

    options
}

/// Creates the single-connection pool the auditor runs on.
async fn create_connection_pool(
    options: MySqlConnectOptions,
    config: &ConnectionConfig,
) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(config.connect_timeout)
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .map_err(|e| RowIdAuditError::Connection {
            context: format!("Failed to connect to {}", config),
            source: Box::new(e),
        })
}
