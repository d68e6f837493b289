//! Error types for row-ID auditing.
//!
//! Every failure the auditor can observe is classified here once, so the
//! audit logic can decide between "skip silently", "warn and skip" and
//! "abort the run" without looking at driver-specific error codes.
//! Credentials never appear in any message produced by this module.

use crate::models::TableRef;
use thiserror::Error;

/// Main error type for rowid-audit operations.
#[derive(Debug, Error)]
pub enum RowIdAuditError {
    /// Database connection failed (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A query or statement failed on the server
    #[error("Query execution failed: {context}")]
    Query {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The table has no implicit row-id column.
    ///
    /// Tables with an explicit integer primary key do not carry
    /// `_tidb_rowid`; this is expected and never escalated.
    #[error("Table {table} has no implicit row-id column")]
    UnsupportedRowIdColumn { table: TableRef },

    /// A result set lacked a column the caller depends on
    #[error("Column '{column}' missing from result of {context}")]
    MissingColumn { column: String, context: String },

    /// A result cell could not be interpreted
    #[error("Invalid value {value:?} in column '{column}'")]
    InvalidValue { column: String, value: String },

    /// Writing the report failed
    #[error("Report output failed: {context}")]
    Output {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results with RowIdAuditError
pub type Result<T> = std::result::Result<T, RowIdAuditError>;

impl RowIdAuditError {
    /// Creates a connection error with sanitized context
    pub fn connection_failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: "Database connection failed".to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a query error with context
    pub fn query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Query {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a missing column error
    pub fn missing_column(column: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            context: context.into(),
        }
    }

    /// Creates an invalid value error for a result cell
    pub fn invalid_value(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Creates a report output error
    pub fn output_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Output {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true when the error means "this table has no row id to audit".
    pub const fn is_unsupported_row_id(&self) -> bool {
        matches!(self, Self::UnsupportedRowIdColumn { .. })
    }
}
