//! Phase two, compare mode: check the server's row-id allocator.

use super::RowIdAuditor;
use super::statements::{ID_TYPE_COLUMN, NEXT_GLOBAL_ROW_ID_COLUMN, ROW_ID_TYPE, next_row_id_sql};
use crate::Result;
use crate::adapters::{QueryResult, parse_i64_cell};
use crate::error::RowIdAuditError;
use crate::models::{ComparisonResult, RowIdFact};

impl RowIdAuditor<'_> {
    /// Compares the server's next row id for the fact's table with the
    /// proposed AUTO_INCREMENT.
    ///
    /// Returns `Ok(None)` when the table has no `_TIDB_ROWID` allocator entry.
    ///
    /// # Errors
    /// Query failures, a result missing `ID_TYPE` or `NEXT_GLOBAL_ROW_ID`,
    /// or a next value that is not an integer
    pub async fn compare(&self, fact: &RowIdFact) -> Result<Option<ComparisonResult>> {
        let sql = next_row_id_sql(fact.table());
        let result = self.adapter.run_query(&sql, Some(fact.table())).await?;

        match next_row_id_from_result(&result, &sql)? {
            Some(next_global_row_id) => {
                Ok(Some(ComparisonResult::new(fact, next_global_row_id)))
            }
            None => {
                tracing::debug!("{} has no {} allocator entry", fact.table(), ROW_ID_TYPE);
                Ok(None)
            }
        }
    }
}

/// Extracts `NEXT_GLOBAL_ROW_ID` of the `_TIDB_ROWID` row of a
/// `SHOW TABLE ... NEXT_ROW_ID` result.
///
/// Rows for other allocators (for example `AUTO_INCREMENT`) are ignored. An
/// empty result, or one without a `_TIDB_ROWID` row, yields `Ok(None)`.
///
/// The row count is checked before the columns: column names are read from
/// the first returned row, so an empty result carries no columns at all and
/// cannot be checked for `ID_TYPE` or `NEXT_GLOBAL_ROW_ID`.
///
/// # Errors
/// Returns `MissingColumn` if either column is absent and `InvalidValue` if
/// the matched next value is NULL or not an integer
pub fn next_row_id_from_result(result: &QueryResult, context: &str) -> Result<Option<i64>> {
    if result.rows.is_empty() {
        return Ok(None);
    }

    let id_type = result.require_column(ID_TYPE_COLUMN, context)?;
    let next_global_row_id = result.require_column(NEXT_GLOBAL_ROW_ID_COLUMN, context)?;

    let Some(row) =
        (0..result.rows.len()).find(|&row| result.cell(row, id_type) == Some(ROW_ID_TYPE))
    else {
        return Ok(None);
    };

    let value = result
        .cell(row, next_global_row_id)
        .ok_or_else(|| RowIdAuditError::invalid_value(NEXT_GLOBAL_ROW_ID_COLUMN, "NULL"))?;

    parse_i64_cell(NEXT_GLOBAL_ROW_ID_COLUMN, value).map(Some)
}
