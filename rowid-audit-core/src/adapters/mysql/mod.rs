//! MySQL/TiDB database adapter.
//!
//! # Module Structure
//! - `connection`: Session setup over a single-connection sqlx pool
//! - `rows`: Row decoding and driver error classification
//!
//! Queries are sent with [`sqlx::raw_sql`] (text protocol) because TiDB's
//! `SHOW TABLE ... NEXT_ROW_ID` is not reliably preparable.

pub mod connection;
pub mod rows;


use super::{ConnectionConfig, DatabaseAdapter, QueryResult};
use crate::Result;
use crate::error::RowIdAuditError;
use crate::identifier::quote_identifier;
use crate::models::TableRef;
use async_trait::async_trait;
use sqlx::MySqlPool;

pub use rows::ER_BAD_FIELD_ERROR;

/// Adapter running audit queries over a MySQL-protocol connection.
pub struct MySqlAdapter {
    /// Connection pool, capped at the configured connection count
    pub pool: MySqlPool,
    /// Connection configuration (no credentials)
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlAdapter")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatabaseAdapter for MySqlAdapter {
    async fn test_connection(&self) -> Result<()> {
        let connectivity_result: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(RowIdAuditError::connection_failed)?;

        if connectivity_result != 1 {
            return Err(RowIdAuditError::configuration(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        Ok(())
    }

    async fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        let sql = show_tables_sql(schema);
        let result = self.run_query(&sql, None).await?;

        let mut tables = Vec::with_capacity(result.rows.len());
        for (index, _) in result.rows.iter().enumerate() {
            match result.cell(index, 0) {
                Some(name) => tables.push(name.to_string()),
                None => {
                    return Err(RowIdAuditError::invalid_value(
                        "table name",
                        format!("NULL in row {index} of `{sql}`"),
                    ));
                }
            }
        }

        tracing::debug!("Schema '{}' has {} tables", schema, tables.len());
        Ok(tables)
    }

    async fn run_query(&self, sql: &str, table: Option<&TableRef>) -> Result<QueryResult> {
        tracing::trace!("query: {}", sql);
        let rows = sqlx::raw_sql(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| rows::classify_error(e, sql, table))?;

        rows::rows_to_result(&rows)
    }

    async fn run_statement(&self, sql: &str) -> Result<()> {
        tracing::trace!("statement: {}", sql);
        let outcome = sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| rows::classify_error(e, sql, None))?;

        tracing::trace!("{} rows affected", outcome.rows_affected());
        Ok(())
    }
}

/// `SHOW TABLES FROM <schema>` with the schema quoted.
pub(crate) fn show_tables_sql(schema: &str) -> String {
    format!("SHOW TABLES FROM {}", quote_identifier(schema))
}
