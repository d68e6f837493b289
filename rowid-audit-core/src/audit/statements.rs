//! SQL text issued by the auditor.
//!
//! All schema and table names are quoted with
//! [`quote_table`](crate::identifier::quote_table); values are integers
//! formatted by Rust, so no caller-controlled text reaches SQL unquoted.

use crate::identifier::quote_table;
use crate::models::{RowIdFact, TableRef};

/// TiDB's implicit row identifier column.
pub const ROW_ID_COLUMN: &str = "_tidb_rowid";

/// `ID_TYPE` value of the implicit row-id allocator in `SHOW TABLE ... NEXT_ROW_ID`.
pub const ROW_ID_TYPE: &str = "_TIDB_ROWID";

/// Column holding the allocator kind in `SHOW TABLE ... NEXT_ROW_ID`.
pub const ID_TYPE_COLUMN: &str = "ID_TYPE";

/// Column holding the next value in `SHOW TABLE ... NEXT_ROW_ID`.
pub const NEXT_GLOBAL_ROW_ID_COLUMN: &str = "NEXT_GLOBAL_ROW_ID";

/// Query for the table's maximum row id, `0` when empty.
pub fn max_row_id_sql(table: &TableRef) -> String {
    format!(
        "SELECT COALESCE(MAX({ROW_ID_COLUMN}), 0) FROM {}",
        quote_table(table)
    )
}

/// Query for the table's allocator state.
pub fn next_row_id_sql(table: &TableRef) -> String {
    format!("SHOW TABLE {} NEXT_ROW_ID", quote_table(table))
}

/// Statement moving the AUTO_INCREMENT counter to the fact's proposed value.
pub fn rebase_sql(fact: &RowIdFact) -> String {
    format!(
        "ALTER TABLE {} AUTO_INCREMENT = {}",
        quote_table(fact.table()),
        fact.proposed_auto_increment()
    )
}
