//! TiDB AUTO_INCREMENT auditing tool.
//!
//! Connects to one server, reads the highest `_tidb_rowid` of every table in
//! the requested schemas, and either reports how the server's row id
//! allocator compares (compare mode) or raises AUTO_INCREMENT past the data
//! (rebase mode).
//!
//! # Exit Status
//! - `2`: invalid command line, including a missing or unknown `--mode`
//! - `1`: the connection could not be opened or the report could not be written
//! - `0`: otherwise, even when individual schemas or tables failed

use clap::Parser;
use rowid_audit::{Cli, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let summary = run(cli).await?;

    if summary.has_failures() {
        tracing::warn!("Some schemas or tables could not be processed; see warnings above");
    }

    Ok(())
}
