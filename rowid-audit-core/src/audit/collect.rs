//! Phase one: enumerate tables and derive row-id facts.

use super::{RowIdAuditor, bump, statements};
use crate::Result;
use crate::adapters::parse_i64_cell;
use crate::models::{AuditSummary, RowIdFact, TableRef};

impl RowIdAuditor<'_> {
    /// Lists the tables of `schema` as table references.
    ///
    /// # Errors
    /// Propagates the adapter's enumeration error
    pub async fn list_tables(&self, schema: &str) -> Result<Vec<TableRef>> {
        let tables = self.adapter.list_tables(schema).await?;
        Ok(tables
            .into_iter()
            .map(|table| TableRef::new(schema, table))
            .collect())
    }

    /// Returns the maximum `_tidb_rowid` of `table`, or `0` when there is none.
    ///
    /// A table without the implicit row-id column, an empty table and a NULL
    /// result all yield `Ok(0)`.
    ///
    /// # Errors
    /// Any other query failure, or a result that is not an integer
    pub async fn max_row_id(&self, table: &TableRef) -> Result<i64> {
        let sql = statements::max_row_id_sql(table);
        let result = match self.adapter.run_query(&sql, Some(table)).await {
            Ok(result) => result,
            Err(e) if e.is_unsupported_row_id() => {
                tracing::debug!("{} has an explicit primary key, no row id", table);
                return Ok(0);
            }
            Err(e) => return Err(e),
        };

        match result.scalar() {
            Some(value) => parse_i64_cell(statements::ROW_ID_COLUMN, value),
            None => Ok(0),
        }
    }

    /// Collects facts for every table of every schema, in order.
    ///
    /// Enumeration failures skip the schema; lookup failures skip the table.
    /// Both are logged as warnings and counted in `summary`.
    pub async fn collect_facts(
        &self,
        schemas: &[String],
        summary: &mut AuditSummary,
    ) -> Vec<RowIdFact> {
        let mut facts = Vec::new();

        for schema in schemas {
            tracing::info!("Processing schema: {}", schema);

            let tables = match self.list_tables(schema).await {
                Ok(tables) => tables,
                Err(e) => {
                    tracing::warn!(
                        "Error getting tables for schema {}: {}. Skipping schema.",
                        schema,
                        e
                    );
                    bump(&mut summary.schemas_failed);
                    continue;
                }
            };
            bump(&mut summary.schemas_processed);

            for table in tables {
                bump(&mut summary.tables_scanned);

                let max_row_id = match self.max_row_id(&table).await {
                    Ok(max_row_id) => max_row_id,
                    Err(e) => {
                        tracing::warn!("Skipping table {}: {}", table, e);
                        bump(&mut summary.tables_skipped);
                        continue;
                    }
                };

                if max_row_id == 0 {
                    bump(&mut summary.tables_skipped);
                    continue;
                }

                let Some(fact) = RowIdFact::from_max_row_id(table.clone(), max_row_id) else {
                    tracing::warn!(
                        "Skipping table {}: unusable max row id {}",
                        table,
                        max_row_id
                    );
                    bump(&mut summary.tables_skipped);
                    continue;
                };

                tracing::debug!(
                    "{}: max row id {}, proposed AUTO_INCREMENT {}",
                    fact.table(),
                    fact.observed_max_row_id(),
                    fact.proposed_auto_increment()
                );
                facts.push(fact);
            }
        }

        summary.facts_collected = facts.len();
        facts
    }
}
