// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel, open_log_file};
use std::io::Write;

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(0).unwrap(), LogLevel::OFF);
    assert_eq!(LogLevel::new(5).unwrap(), LogLevel::TRACE);
    insta::assert_snapshot!(
        LogLevel::new(6).unwrap_err().to_string(),
        @"invalid value for 'level' in section '[log]': log level must be 0-5, got 6"
    );
}

#[test]
fn test_log_level_display() {
    let names: Vec<_> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(|level| level.to_string())
        .collect();
    assert_eq!(names, ["off", "error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_log_level_deserialize() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert!(config.log_file().is_none());
    assert!(!config.json());
}

#[test]
fn test_file_level_follows_louder_console() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::TRACE)
        .build();
    assert_eq!(config.file_level(), LogLevel::TRACE);
}

#[test]
fn test_open_log_file_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("envstore.log");

    writeln!(open_log_file(&path).unwrap(), "first").unwrap();
    writeln!(open_log_file(&path).unwrap(), "second").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}
