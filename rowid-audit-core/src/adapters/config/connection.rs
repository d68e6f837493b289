//! Database connection configuration.
//!
//! This module provides the `ConnectionConfig` struct describing where and
//! how to reach the TiDB server. Passwords live in
//! [`Credentials`](crate::security::Credentials), never here.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default TiDB SQL port.
pub const DEFAULT_PORT: u16 = 4000;

/// Configuration for the audit session's database connection.
///
/// # Security
/// This struct intentionally does NOT store passwords or credentials.
///
/// # Example
/// ```rust
/// use rowid_audit_core::adapters::ConnectionConfig;
///
/// let config = ConnectionConfig::new("10.0.0.7".to_string()).with_port(4000);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.to_string(), "ConnectionConfig(10.0.0.7:4000)");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Maximum number of pooled connections; the auditor uses exactly one
    pub max_connections: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(30),
            max_connections: 1,
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials are never included
        write!(f, "ConnectionConfig({}:{})", self.host, self.port)
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if configuration values are invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.is_empty() {
            return Err(crate::error::RowIdAuditError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == 0 {
            return Err(crate::error::RowIdAuditError::configuration(
                "port must be greater than 0",
            ));
        }

        if self.max_connections == 0 {
            return Err(crate::error::RowIdAuditError::configuration(
                "max_connections must be greater than 0",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(crate::error::RowIdAuditError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Creates a new connection config with defaults for everything but the host.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Builder method to set port.
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set the connect timeout.
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
