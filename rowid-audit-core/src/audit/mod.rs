//! The row-ID auditor.
//!
//! A run has two phases. Phase one walks every requested schema and table
//! and derives a [`RowIdFact`] for each table with a positive maximum row id.
//! Phase two applies the requested [`AuditMode`] to every fact, in the order
//! the facts were collected.
//!
//! Failures never cross a table or schema boundary: an enumeration error
//! skips its schema, a lookup or action error skips its table, and the run
//! carries on. Only report output errors abort a run.
//!
//! # Caveat
//! Rebase is not atomic with measurement. A writer inserting rows between
//! phase one and phase two can advance the real row id past the proposed
//! value, and the statement will then set the counter below the data.
//!
//! # Module Structure
//! - `collect`: table enumeration and max-row-id lookup
//! - `compare`: `SHOW TABLE ... NEXT_ROW_ID` verification
//! - `rebase`: AUTO_INCREMENT adjustment
//! - `statements`: SQL text

mod collect;
mod compare;
mod rebase;
pub mod statements;


pub use compare::next_row_id_from_result;
pub use rebase::RebaseOutcome;

use crate::Result;
use crate::adapters::DatabaseAdapter;
use crate::models::{AuditMode, AuditSummary, ComparisonStatus, RowIdFact};
use crate::report::ComparisonSink;

/// Audits row-id state through a database adapter.
pub struct RowIdAuditor<'a> {
    adapter: &'a dyn DatabaseAdapter,
    dry_run: bool,
}

impl std::fmt::Debug for RowIdAuditor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowIdAuditor")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> RowIdAuditor<'a> {
    /// Creates an auditor that executes rebase statements.
    pub fn new(adapter: &'a dyn DatabaseAdapter) -> Self {
        Self {
            adapter,
            dry_run: false,
        }
    }

    /// When set, rebase statements are logged but never sent.
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether rebase statements are withheld.
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Runs both phases over `schemas`.
    ///
    /// In compare mode results stream into `sink`; in rebase mode `sink` is
    /// left untouched.
    ///
    /// # Errors
    /// Returns an error only if `sink` fails; database errors are logged and
    /// counted in the returned summary.
    pub async fn run(
        &self,
        mode: AuditMode,
        schemas: &[String],
        sink: &mut dyn ComparisonSink,
    ) -> Result<AuditSummary> {
        tracing::info!("Target schemas: {:?}", schemas);

        let mut summary = AuditSummary::default();
        let facts = self.collect_facts(schemas, &mut summary).await;
        tracing::info!(
            "Finished collecting max row ids: {} of {} tables carry a row id",
            facts.len(),
            summary.tables_scanned
        );

        match mode {
            AuditMode::Rebase => {
                tracing::info!("Starting AUTO_INCREMENT updates...");
                self.rebase_all(&facts, &mut summary).await;
                tracing::info!("AUTO_INCREMENT update process finished");
            }
            AuditMode::Compare => {
                self.compare_all(&facts, sink, &mut summary).await?;
            }
        }

        log_summary(mode, &summary);
        Ok(summary)
    }

    async fn rebase_all(&self, facts: &[RowIdFact], summary: &mut AuditSummary) {
        for fact in facts {
            match self.rebase(fact).await {
                Ok(RebaseOutcome::Executed { .. }) => bump(&mut summary.statements_executed),
                Ok(RebaseOutcome::DryRun { .. }) => bump(&mut summary.statements_dry_run),
                Err(e) => {
                    tracing::warn!("Error updating AUTO_INCREMENT for {}: {}", fact.table(), e);
                    bump(&mut summary.statements_failed);
                }
            }
        }
    }

    async fn compare_all(
        &self,
        facts: &[RowIdFact],
        sink: &mut dyn ComparisonSink,
        summary: &mut AuditSummary,
    ) -> Result<()> {
        sink.begin()?;
        for fact in facts {
            match self.compare(fact).await {
                Ok(Some(result)) => {
                    match result.status {
                        ComparisonStatus::Ok => bump(&mut summary.compared_ok),
                        ComparisonStatus::Error => {
                            tracing::warn!(
                                "{}: next global row id {} is behind expected {}",
                                result.table,
                                result.current_next_global_row_id,
                                result.expected
                            );
                            bump(&mut summary.compared_error);
                        }
                    }
                    sink.record(&result)?;
                }
                Ok(None) => bump(&mut summary.compared_without_row_id),
                Err(e) => {
                    tracing::warn!("Error comparing {}: {}", fact.table(), e);
                    bump(&mut summary.comparisons_failed);
                }
            }
        }
        sink.finish()
    }
}

fn log_summary(mode: AuditMode, summary: &AuditSummary) {
    tracing::info!(
        "Scanned {} tables in {} schemas ({} schemas failed, {} tables skipped)",
        summary.tables_scanned,
        summary.schemas_processed,
        summary.schemas_failed,
        summary.tables_skipped
    );
    match mode {
        AuditMode::Rebase => tracing::info!(
            "Rebase: {} executed, {} dry-run, {} failed",
            summary.statements_executed,
            summary.statements_dry_run,
            summary.statements_failed
        ),
        AuditMode::Compare => tracing::info!(
            "Compare: {} OK, {} ERROR, {} without row id allocator, {} failed",
            summary.compared_ok,
            summary.compared_error,
            summary.compared_without_row_id,
            summary.comparisons_failed
        ),
    }
}

/// Increments a summary counter.
fn bump(counter: &mut usize) {
    *counter = counter.saturating_add(1);
}
