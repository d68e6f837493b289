//! Library module for rowid-audit
//!
//! Holds the command-line surface and the run entry point so that argument
//! handling can be tested without a server. The binary is a thin wrapper in
//! main.rs.

use anyhow::Context;
use clap::{Args, Parser};
use rowid_audit_core::{
    AuditMode, AuditSummary, ConnectionConfig, Credentials, CsvReport, DatabaseAdapter,
    RowIdAuditor, adapters::mysql::MySqlAdapter, init_logging,
};
use std::time::Duration;
use tracing::{error, info};

/// CLI argument structure
#[derive(Parser, Debug)]
#[command(name = "rowid-audit")]
#[command(about = "Audit and rebase TiDB AUTO_INCREMENT counters")]
#[command(version)]
#[command(long_about = "
rowid-audit - TiDB row id / AUTO_INCREMENT consistency auditor

For every table of the given schemas that carries an implicit _tidb_rowid,
the highest row id in use is read and AUTO_INCREMENT = max + 1 is proposed.

MODES:
  compare  Check the server's next global row id against the proposal and
           print a CSV report on stdout (OK when current >= expected)
  rebase   Run ALTER TABLE ... AUTO_INCREMENT = <proposal> for every table

EXAMPLES:
  rowid-audit --mode compare --schemas shop,crm > report.csv
  rowid-audit --mode rebase --schemas shop --dry-run
  ROWID_AUDIT_PASSWORD=secret rowid-audit --host tidb --mode rebase --schemas shop
")]
pub struct Cli {
    /// Verbosity flags
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Server address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Server port
    #[arg(long, default_value_t = rowid_audit_core::adapters::DEFAULT_PORT)]
    pub port: u16,

    /// Login user
    #[arg(long, default_value = "root")]
    pub user: String,

    /// Login password
    #[arg(
        long,
        env = "ROWID_AUDIT_PASSWORD",
        default_value = "",
        hide_env_values = true,
        help = "Login password (prefer the environment variable or --password-prompt)"
    )]
    pub password: String,

    /// Read the password from the terminal
    #[arg(long, help = "Read the password from the terminal (overrides --password)")]
    pub password_prompt: bool,

    /// Action to perform
    #[arg(long, help = "Action to perform: compare or rebase")]
    pub mode: AuditMode,

    /// Schemas to audit
    #[arg(
        long,
        default_value = "",
        help = "Comma-separated list of schemas to audit"
    )]
    pub schemas: String,

    /// Log rebase statements without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Connect timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub connect_timeout: u64,
}

/// Flags shared by every invocation
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all diagnostics except errors")]
    pub quiet: bool,
}

impl Cli {
    /// The schema list, split on commas.
    pub fn schema_list(&self) -> Vec<String> {
        parse_schema_list(&self.schemas)
    }

    /// Connection settings from the flags.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(self.host.clone())
            .with_port(self.port)
            .with_connect_timeout(Duration::from_secs(self.connect_timeout))
    }
}

/// Splits a comma-separated schema list.
///
/// Pieces are kept verbatim, surrounding whitespace included, and an empty
/// input yields a single empty schema name rather than no schemas.
pub fn parse_schema_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Reads the login password from the terminal.
fn prompt_password() -> anyhow::Result<String> {
    rpassword::prompt_password("Password: ").context("Failed to read password")
}

/// Resolves credentials from the flags, prompting if requested.
///
/// # Errors
/// Returns an error if the terminal prompt fails
pub fn resolve_credentials(cli: &Cli) -> anyhow::Result<Credentials> {
    let password = if cli.password_prompt {
        prompt_password()?
    } else {
        cli.password.clone()
    };
    Ok(Credentials::new(cli.user.clone(), Some(password)))
}

/// Runs the audit described by `cli`.
///
/// # Errors
/// Returns an error if logging cannot be initialized, the connection cannot
/// be opened, or the compare report cannot be written. Per-table and
/// per-schema failures are logged and do not fail the run.
pub async fn run(cli: Cli) -> anyhow::Result<AuditSummary> {
    init_logging(cli.global.verbose, cli.global.quiet)?;

    let credentials = resolve_credentials(&cli)?;
    let config = cli.connection_config();
    let schemas = cli.schema_list();

    info!(
        "Connecting to {}:{} as {}",
        config.host,
        config.port,
        credentials.username()
    );
    let adapter = MySqlAdapter::connect(config, &credentials)
        .await
        .inspect_err(|e| error!("Failed to connect: {}", e))
        .context("Failed to connect to database")?;
    drop(credentials);

    adapter
        .test_connection()
        .await
        .context("Connection check failed")?;
    info!("Connected");

    let auditor = RowIdAuditor::new(&adapter).with_dry_run(cli.dry_run);
    let stdout = std::io::stdout();
    let mut report = CsvReport::new(stdout.lock());
    let outcome = auditor.run(cli.mode, &schemas, &mut report).await;

    adapter.close().await;
    outcome.context("Failed to write comparison report")
}
