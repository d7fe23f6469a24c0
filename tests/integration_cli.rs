// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use envstore::cli::global::GlobalOptions;
use envstore::cli::{Cli, Command, ExportFormat, OriginArg};
use std::path::PathBuf;

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["envstore", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["envstore"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_unknown_command() {
    assert!(Cli::try_parse_from(["envstore", "frobnicate"]).is_err());
}

#[test]
fn cli_get_requires_name() {
    assert!(Cli::try_parse_from(["envstore", "get"]).is_err());
}

#[test]
fn cli_has_command() {
    let cli = Cli::try_parse_from(["envstore", "has", "PATH"]).unwrap();
    let Some(Command::Has(args)) = cli.command else {
        panic!("expected has");
    };
    assert_eq!(args.name, "PATH");
}

#[test]
fn cli_list_origin_values() {
    for (arg, expected) in [
        ("primary", OriginArg::Primary),
        ("secondary", OriginArg::Secondary),
        ("all", OriginArg::All),
    ] {
        let cli = Cli::try_parse_from(["envstore", "list", "--origin", arg]).unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.origin, expected);
    }
    assert!(Cli::try_parse_from(["envstore", "list", "--origin", "both"]).is_err());
}

#[test]
fn cli_export_default_format() {
    let cli = Cli::try_parse_from(["envstore", "export"]).unwrap();
    let Some(Command::Export(args)) = cli.command else {
        panic!("expected export");
    };
    assert_eq!(args.format, ExportFormat::Env);
}

#[test]
fn cli_repeated_inis_keep_order() {
    let cli =
        Cli::try_parse_from(["envstore", "--ini", "a.toml", "-i", "b.toml", "options"]).unwrap();
    assert_eq!(
        cli.global.inis,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
}

#[test]
fn cli_global_options_to_config_overrides() {
    let opts = GlobalOptions {
        log_level: Some(5),
        log_file: Some(PathBuf::from("out.log")),
        json_logs: true,
        allow_empty_primary: true,
        reject_empty_values: true,
        ..GlobalOptions::default()
    };

    let overrides = opts.to_config_overrides();
    insta::assert_snapshot!(
        overrides
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        @r"
    log.level=5
    log.file=out.log
    log.json=true
    store.allow_empty_primary=true
    store.empty_values=reject
    "
    );
}

#[test]
fn cli_no_overrides_by_default() {
    assert!(GlobalOptions::default().to_config_overrides().is_empty());
}
