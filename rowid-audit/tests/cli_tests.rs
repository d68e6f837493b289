//! Command-line parsing tests
//!
//! These run without a server: they cover flag defaults, mode validation and
//! schema list handling.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use clap::Parser;
use clap::error::ErrorKind;
use rowid_audit::{Cli, parse_schema_list, resolve_credentials};
use rowid_audit_core::AuditMode;
use std::time::Duration;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("rowid-audit").chain(args.iter().copied()))
}

#[test]
fn test_defaults() {
    let cli = parse(&["--mode", "compare"]).unwrap();

    assert_eq!(cli.host, "127.0.0.1");
    assert_eq!(cli.port, 4000);
    assert_eq!(cli.user, "root");
    assert_eq!(cli.mode, AuditMode::Compare);
    assert!(!cli.dry_run);
    assert!(!cli.password_prompt);
    assert_eq!(cli.global.verbose, 0);
    assert!(!cli.global.quiet);

    let config = cli.connection_config();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 4000);
    assert_eq!(config.connect_timeout, Duration::from_secs(30));
}

#[test]
fn test_missing_mode_is_usage_error() {
    let err = parse(&["--schemas", "shop"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_unknown_mode_is_rejected() {
    for mode in ["sync", "Compare", "REBASE", ""] {
        let err = parse(&["--mode", mode]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation, "mode {:?}", mode);
    }
}

#[test]
fn test_full_flag_set() {
    let cli = parse(&[
        "--host",
        "tidb.internal",
        "--port",
        "4001",
        "--user",
        "auditor",
        "--mode",
        "rebase",
        "--schemas",
        "shop,crm",
        "--dry-run",
        "--connect-timeout",
        "5",
        "-vv",
    ])
    .unwrap();

    assert_eq!(cli.mode, AuditMode::Rebase);
    assert!(cli.dry_run);
    assert_eq!(cli.global.verbose, 2);
    assert_eq!(cli.schema_list(), vec!["shop".to_string(), "crm".to_string()]);

    let config = cli.connection_config();
    assert_eq!(config.host, "tidb.internal");
    assert_eq!(config.port, 4001);
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
}

#[test]
fn test_invalid_port_is_rejected() {
    let err = parse(&["--mode", "compare", "--port", "70000"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_schema_list_parsing() {
    assert_eq!(parse_schema_list(""), vec![String::new()]);
    assert_eq!(parse_schema_list("shop"), vec!["shop".to_string()]);
    assert_eq!(
        parse_schema_list("shop,crm,billing"),
        vec!["shop".to_string(), "crm".to_string(), "billing".to_string()]
    );
    assert_eq!(
        parse_schema_list("shop, crm "),
        vec!["shop".to_string(), " crm ".to_string()]
    );
    assert_eq!(
        parse_schema_list("shop,"),
        vec!["shop".to_string(), String::new()]
    );
}

#[test]
fn test_default_schemas_is_one_empty_name() {
    let cli = parse(&["--mode", "rebase"]).unwrap();
    assert_eq!(cli.schema_list(), vec![String::new()]);
}

#[test]
fn test_credentials_from_flags() {
    let cli = parse(&["--mode", "compare", "--user", "auditor", "--password", "s3cret"]).unwrap();
    let credentials = resolve_credentials(&cli).unwrap();

    assert_eq!(credentials.username(), "auditor");
    assert!(credentials.has_password());
    assert!(!format!("{:?}", credentials).contains("s3cret"));
}

#[test]
fn test_explicit_empty_password_means_none() {
    let cli = parse(&["--mode", "compare", "--password", ""]).unwrap();
    let credentials = resolve_credentials(&cli).unwrap();
    assert!(!credentials.has_password());
}
