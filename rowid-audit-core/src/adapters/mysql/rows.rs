//! Conversion of MySQL rows and driver errors into adapter types.

use crate::Result;
use crate::adapters::QueryResult;
use crate::error::RowIdAuditError;
use crate::models::TableRef;
use sqlx::mysql::{MySqlDatabaseError, MySqlRow};
use sqlx::{Column, Row};

/// `ER_BAD_FIELD_ERROR`: "Unknown column '...' in 'field list'".
pub const ER_BAD_FIELD_ERROR: u16 = 1054;

/// Converts fetched rows into a [`QueryResult`].
///
/// Column names are taken from the first row; an empty result has no columns.
pub(crate) fn rows_to_result(rows: &[MySqlRow]) -> Result<QueryResult> {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();

    let values = rows
        .iter()
        .map(|row| {
            (0..row.len())
                .map(|index| cell_to_string(row, index))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QueryResult::new(columns, values))
}

/// Reads one cell as text regardless of its SQL type.
///
/// Text-protocol results carry every value as text, but the column type
/// still drives sqlx's compatibility check, so typed decodes are tried first
/// and the unchecked string decode is the last resort.
fn cell_to_string(row: &MySqlRow, index: usize) -> Result<Option<String>> {
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return Ok(value);
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return Ok(value.map(|v| v.to_string()));
    }
    if let Ok(value) = row.try_get::<Option<u64>, _>(index) {
        return Ok(value.map(|v| v.to_string()));
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return Ok(value.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()));
    }

    row.try_get_unchecked::<Option<String>, _>(index)
        .map_err(|e| RowIdAuditError::query_failed(format!("Failed to decode column {index}"), e))
}

/// Maps a driver error to the adapter error taxonomy.
pub(crate) fn classify_error(
    error: sqlx::Error,
    sql: &str,
    table: Option<&TableRef>,
) -> RowIdAuditError {
    let number = match &error {
        sqlx::Error::Database(db_err) => db_err
            .try_downcast_ref::<MySqlDatabaseError>()
            .map(MySqlDatabaseError::number),
        _ => None,
    };

    match (classify_error_number(number), table) {
        (ErrorClass::UnknownColumn, Some(table)) => RowIdAuditError::UnsupportedRowIdColumn {
            table: table.clone(),
        },
        _ => RowIdAuditError::query_failed(format!("Failed to run `{sql}`"), error),
    }
}

/// Coarse classification of MySQL error numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorClass {
    /// The statement referenced a column that does not exist
    UnknownColumn,
    /// Anything else
    Other,
}

pub(crate) const fn classify_error_number(number: Option<u16>) -> ErrorClass {
    match number {
        Some(ER_BAD_FIELD_ERROR) => ErrorClass::UnknownColumn,
        _ => ErrorClass::Other,
    }
}
