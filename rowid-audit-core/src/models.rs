//! Data structures describing tables, their row-id facts and audit outcomes.

use crate::error::{Result, RowIdAuditError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a table by schema and table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRef {
    /// Schema (database) name
    pub schema: String,
    /// Table name within the schema
    pub table: String,
}

impl TableRef {
    /// Creates a table reference from a schema and table name.
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// The observed maximum row id of a table and the counter value derived from it.
///
/// Only constructed through [`RowIdFact::from_max_row_id`], which guarantees
/// `observed_max_row_id > 0` and `proposed_auto_increment == observed_max_row_id + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIdFact {
    table: TableRef,
    observed_max_row_id: i64,
    proposed_auto_increment: i64,
}

impl RowIdFact {
    /// Derives a fact from the observed maximum row id.
    ///
    /// Returns `None` when the maximum is not strictly positive (empty table,
    /// no row-id column) or when the next value would overflow `i64`.
    pub fn from_max_row_id(table: TableRef, observed_max_row_id: i64) -> Option<Self> {
        if observed_max_row_id <= 0 {
            return None;
        }
        let proposed_auto_increment = observed_max_row_id.checked_add(1)?;
        Some(Self {
            table,
            observed_max_row_id,
            proposed_auto_increment,
        })
    }

    /// The table this fact describes.
    pub const fn table(&self) -> &TableRef {
        &self.table
    }

    /// Maximum `_tidb_rowid` seen in the table.
    pub const fn observed_max_row_id(&self) -> i64 {
        self.observed_max_row_id
    }

    /// The lowest AUTO_INCREMENT value that cannot collide with existing rows.
    pub const fn proposed_auto_increment(&self) -> i64 {
        self.proposed_auto_increment
    }
}

/// Verdict of comparing the server's counter with the observed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonStatus {
    /// The server will hand out ids above every existing row id
    #[serde(rename = "OK")]
    Ok,
    /// The server counter is behind the data; future inserts may collide
    #[serde(rename = "ERROR")]
    Error,
}

impl ComparisonStatus {
    /// Judges a server counter against the expected next id.
    pub const fn judge(current_next_global_row_id: i64, expected: i64) -> Self {
        if current_next_global_row_id >= expected {
            Self::Ok
        } else {
            Self::Error
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Outcome of comparing one table in compare mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// The compared table
    pub table: TableRef,
    /// Expected next id (the fact's proposed AUTO_INCREMENT)
    pub expected: i64,
    /// `NEXT_GLOBAL_ROW_ID` reported by the server for `_TIDB_ROWID`
    pub current_next_global_row_id: i64,
    /// Verdict
    pub status: ComparisonStatus,
}

impl ComparisonResult {
    /// Builds the result for a fact and the server-reported next id.
    pub fn new(fact: &RowIdFact, current_next_global_row_id: i64) -> Self {
        let expected = fact.proposed_auto_increment();
        Self {
            table: fact.table().clone(),
            expected,
            current_next_global_row_id,
            status: ComparisonStatus::judge(current_next_global_row_id, expected),
        }
    }
}

/// Terminal action applied to every collected fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditMode {
    /// Report whether the server counter is ahead of the data
    Compare,
    /// Raise the AUTO_INCREMENT counter above the data
    Rebase,
}

impl FromStr for AuditMode {
    type Err = RowIdAuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compare" => Ok(Self::Compare),
            "rebase" => Ok(Self::Rebase),
            other => Err(RowIdAuditError::configuration(format!(
                "invalid mode '{other}': expected 'compare' or 'rebase'"
            ))),
        }
    }
}

impl fmt::Display for AuditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare => write!(f, "compare"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Counters describing a single audit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Schemas whose tables were enumerated
    pub schemas_processed: usize,
    /// Schemas skipped because enumeration failed
    pub schemas_failed: usize,
    /// Tables whose maximum row id was queried
    pub tables_scanned: usize,
    /// Tables without a usable row id, or whose lookup failed
    pub tables_skipped: usize,
    /// Facts carried into the action phase
    pub facts_collected: usize,
    /// Rebase statements executed successfully
    pub statements_executed: usize,
    /// Rebase statements logged but not sent (dry run)
    pub statements_dry_run: usize,
    /// Rebase statements rejected by the server
    pub statements_failed: usize,
    /// Tables whose counter is at or above the expected value
    pub compared_ok: usize,
    /// Tables whose counter is behind the data
    pub compared_error: usize,
    /// Tables with no `_TIDB_ROWID` entry in their allocator metadata
    pub compared_without_row_id: usize,
    /// Tables whose comparison could not be completed
    pub comparisons_failed: usize,
}

impl AuditSummary {
    /// Returns true if any schema, table or action failed during the run.
    pub const fn has_failures(&self) -> bool {
        self.schemas_failed > 0 || self.statements_failed > 0 || self.comparisons_failed > 0
    }
}
