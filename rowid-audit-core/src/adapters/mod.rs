//! Database adapter trait and result types.
//!
//! The auditor only needs three capabilities from the database: enumerate the
//! tables of a schema, run a query and run a statement. `DatabaseAdapter`
//! captures exactly those, so the audit logic can be driven by the MySQL/TiDB
//! adapter in production and by scripted adapters in tests.
//!
//! # Module Structure
//! - `config`: Connection configuration
//! - `mysql`: sqlx-backed adapter for TiDB and MySQL-compatible servers

use crate::{Result, error::RowIdAuditError};
use async_trait::async_trait;

pub mod config;

pub use config::{ConnectionConfig, DEFAULT_PORT};

/// Database capabilities the auditor depends on.
///
/// # Error classification
/// Implementations must report a query that fails because the referenced
/// column does not exist as [`RowIdAuditError::UnsupportedRowIdColumn`] when
/// the query targets a single table (`table` is `Some`). Every other failure
/// is a [`RowIdAuditError::Query`].
///
/// # Object Safety
/// This trait is object-safe; the auditor holds a `&dyn DatabaseAdapter`.
#[async_trait]
pub trait DatabaseAdapter: Send + Sync {
    /// Tests that the session is usable.
    ///
    /// # Errors
    /// Returns a connection error if the server cannot be reached
    async fn test_connection(&self) -> Result<()>;

    /// Lists the tables of `schema` in the order the server returns them.
    async fn list_tables(&self, schema: &str) -> Result<Vec<String>>;

    /// Runs a query and returns its columns and textual rows.
    ///
    /// `table` names the table the query targets, used for error
    /// classification and messages.
    async fn run_query(
        &self,
        sql: &str,
        table: Option<&crate::models::TableRef>,
    ) -> Result<QueryResult>;

    /// Runs a statement that returns no rows.
    async fn run_statement(&self, sql: &str) -> Result<()>;
}

/// Columns and rows returned by [`DatabaseAdapter::run_query`].
///
/// Cells are carried as text (`None` for SQL NULL); numeric interpretation
/// happens where the meaning of the column is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Column names in result order
    pub columns: Vec<String>,
    /// Row values, one entry per column
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    /// Creates a result from column names and rows.
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Finds a column by exact name, falling back to a case-insensitive match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)))
    }

    /// Like [`column_index`](Self::column_index) but reports a missing column as an error.
    ///
    /// # Errors
    /// Returns `MissingColumn` naming `context` when the column is absent
    pub fn require_column(&self, name: &str, context: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| RowIdAuditError::missing_column(name, context))
    }

    /// Returns the cell at (`row`, `column`), `None` for NULL or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(Option::as_deref)
    }

    /// Returns the first cell of the first row, `None` if absent or NULL.
    pub fn scalar(&self) -> Option<&str> {
        self.cell(0, 0)
    }
}

/// Parses an integer cell, reporting the column on failure.
///
/// # Errors
/// Returns `InvalidValue` when the text is not a base-10 `i64`
pub fn parse_i64_cell(column: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| RowIdAuditError::invalid_value(column, value))
}

// Database-specific adapter modules
#[cfg(feature = "mysql")]
pub mod mysql;
