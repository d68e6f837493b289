//! Compare-mode report output.
//!
//! Results are written as CSV with the header
//! `Schema,Table,Expected,Current,Status`. Names that contain a delimiter or
//! quote are quoted per RFC 4180; ordinary names are written verbatim.

use crate::Result;
use crate::error::RowIdAuditError;
use crate::models::{ComparisonResult, ComparisonStatus};
use serde::Serialize;
use std::io::Write;

/// Header row of the compare report.
pub const REPORT_HEADER: [&str; 5] = ["Schema", "Table", "Expected", "Current", "Status"];

/// Receives comparison results as the auditor produces them.
pub trait ComparisonSink {
    /// Called once before the first result.
    fn begin(&mut self) -> Result<()>;

    /// Called once per verified table.
    fn record(&mut self, result: &ComparisonResult) -> Result<()>;

    /// Called once after the last result.
    fn finish(&mut self) -> Result<()>;
}

#[derive(Serialize)]
struct ReportRow<'a> {
    schema: &'a str,
    table: &'a str,
    expected: i64,
    current: i64,
    status: ComparisonStatus,
}

impl<'a> From<&'a ComparisonResult> for ReportRow<'a> {
    fn from(result: &'a ComparisonResult) -> Self {
        Self {
            schema: &result.table.schema,
            table: &result.table.table,
            expected: result.expected,
            current: result.current_next_global_row_id,
            status: result.status,
        }
    }
}

/// CSV writer for comparison results.
pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReport<W> {
    /// Creates a report over `output`. Nothing is written until [`begin`](ComparisonSink::begin).
    pub fn new(output: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(output);
        Self { writer }
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    /// Returns an output error if buffered data cannot be flushed
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| RowIdAuditError::output_failed("Failed to flush report", e.into_error()))
    }
}

impl<W: Write> ComparisonSink for CsvReport<W> {
    fn begin(&mut self) -> Result<()> {
        self.writer
            .write_record(REPORT_HEADER)
            .map_err(|e| RowIdAuditError::output_failed("Failed to write report header", e))
    }

    fn record(&mut self, result: &ComparisonResult) -> Result<()> {
        self.writer
            .serialize(ReportRow::from(result))
            .map_err(|e| {
                RowIdAuditError::output_failed(format!("Failed to write row for {}", result.table), e)
            })
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| RowIdAuditError::output_failed("Failed to flush report", e))
    }
}

/// Sink that keeps results in memory.
#[derive(Debug, Default)]
pub struct CollectedResults {
    /// Results in the order they were recorded
    pub results: Vec<ComparisonResult>,
    /// Whether `begin` was called
    pub started: bool,
    /// Whether `finish` was called
    pub finished: bool,
}

impl ComparisonSink for CollectedResults {
    fn begin(&mut self) -> Result<()> {
        self.started = true;
        Ok(())
    }

    fn record(&mut self, result: &ComparisonResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
