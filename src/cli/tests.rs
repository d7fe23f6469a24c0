// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command, ExportFormat, OriginArg};
use crate::store::Origins;
use clap::Parser;

#[test]
fn test_parse_get_with_default() {
    let cli = Cli::try_parse_from(["envstore", "get", "HOME", "--default", "/tmp"]).unwrap();
    match cli.command {
        Some(Command::Get(args)) => {
            assert_eq!(args.name, "HOME");
            assert_eq!(args.default.as_deref(), Some("/tmp"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "envstore",
        "-l",
        "4",
        "-c",
        "SERVER_NAME=localhost",
        "--context",
        "SERVER_PORT=80",
        "--drop-invalid",
        "count",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(cli.global.context, ["SERVER_NAME=localhost", "SERVER_PORT=80"]);
    assert!(matches!(cli.command, Some(Command::Count)));
    assert_eq!(
        cli.global.to_config_overrides(),
        [
            ("log.level", "4".to_string()),
            ("store.admission", "drop-invalid".to_string()),
        ]
    );
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["envstore", "-l", "6", "count"]).is_err());
}

#[test]
fn test_parse_list_and_export_defaults() {
    let cli = Cli::try_parse_from(["envstore", "list"]).unwrap();
    let Some(Command::List(args)) = cli.command else {
        panic!("expected list");
    };
    assert_eq!(args.origin, OriginArg::All);
    assert_eq!(args.origin.origins(), Origins::all());

    let cli = Cli::try_parse_from(["envstore", "export", "-f", "json"]).unwrap();
    let Some(Command::Export(args)) = cli.command else {
        panic!("expected export");
    };
    assert_eq!(args.format, ExportFormat::Json);
}

#[test]
fn test_parse_check_accepts_odd_values() {
    let cli = Cli::try_parse_from(["envstore", "check", "NAME", "-value"]).unwrap();
    let Some(Command::Check(args)) = cli.command else {
        panic!("expected check");
    };
    assert_eq!(args.value, "-value");
}
