//! Phase two, rebase mode: move the AUTO_INCREMENT counter.

use super::RowIdAuditor;
use super::statements::rebase_sql;
use crate::Result;
use crate::models::RowIdFact;

/// What happened to a rebase statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// The statement was sent and accepted
    Executed {
        /// Statement text as sent
        statement: String,
    },
    /// Dry run: the statement was logged only
    DryRun {
        /// Statement text as it would have been sent
        statement: String,
    },
}

impl RebaseOutcome {
    /// The statement text, executed or not.
    pub fn statement(&self) -> &str {
        match self {
            Self::Executed { statement } | Self::DryRun { statement } => statement,
        }
    }
}

impl RowIdAuditor<'_> {
    /// Sets the fact's table AUTO_INCREMENT to the proposed value.
    ///
    /// The statement is logged before it is sent. In dry-run mode it is
    /// logged only.
    ///
    /// # Errors
    /// Returns the adapter error if the server rejects the statement
    pub async fn rebase(&self, fact: &RowIdFact) -> Result<RebaseOutcome> {
        let statement = rebase_sql(fact);
        tracing::info!(">>> {};", statement);

        if self.dry_run {
            return Ok(RebaseOutcome::DryRun { statement });
        }

        self.adapter.run_statement(&statement).await?;
        Ok(RebaseOutcome::Executed { statement })
    }
}
