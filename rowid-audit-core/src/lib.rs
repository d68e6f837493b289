//! Row-ID auditing for TiDB-compatible databases.
//!
//! TiDB tables without an explicit integer primary key carry an implicit
//! `_tidb_rowid` column. This crate derives, per table, the lowest
//! AUTO_INCREMENT value that cannot collide with existing rows, and either
//! compares it with the server's allocator state or rebases the counter.
//!
//! # Architecture
//! - [`adapters`]: the three database capabilities the auditor needs, and
//!   the sqlx-backed MySQL/TiDB implementation
//! - [`audit`]: the two-phase auditor (collect facts, then act on them)
//! - [`report`]: CSV output for compare mode
//! - [`identifier`]: backtick quoting for schema and table names
//!
//! # Security Guarantees
//! - Passwords are held in zeroizing containers and never logged
//! - Identifiers reach SQL only through structural quoting
//! - The only write ever issued is `ALTER TABLE ... AUTO_INCREMENT`

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod adapters;
pub mod audit;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod models;
pub mod report;
pub mod security;

// Re-export commonly used types
pub use adapters::{ConnectionConfig, DatabaseAdapter, QueryResult};
pub use audit::{RebaseOutcome, RowIdAuditor};
pub use error::{Result, RowIdAuditError};
pub use logging::init_logging;
pub use models::{
    AuditMode, AuditSummary, ComparisonResult, ComparisonStatus, RowIdFact, TableRef,
};
pub use report::{CollectedResults, ComparisonSink, CsvReport};
pub use security::Credentials;
