// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE              ← Additional config files (can repeat)
//! --log-level N           ← Console verbosity (0-5)
//! --log-file FILE         ← Also log to FILE
//! --json-logs             ← JSON console events
//! --context NAME=VALUE    ← Request context entry (can repeat)
//! --allow-empty-primary   ← store.allow_empty_primary = true
//! --reject-empty-values   ← store.empty_values = "reject"
//! --drop-invalid          ← store.admission = "drop-invalid"
//!
//! Precedence: CLI flags > ENVSTORE_* > --ini > envstore.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Disables loading `envstore.toml` from the current directory.
    #[arg(long = "no-default-ini")]
    pub no_default_ini: bool,

    /// Console log level (0=off, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Emits console logs as JSON.
    #[arg(long = "json-logs")]
    pub json_logs: bool,

    /// Adds a request context entry, such as 'SERVER_NAME=localhost'.
    /// Can be specified multiple times; later entries win.
    #[arg(short = 'c', long = "context", value_name = "NAME=VALUE", action = clap::ArgAction::Append)]
    pub context: Vec<String>,

    /// Accepts an empty process environment.
    #[arg(long = "allow-empty-primary")]
    pub allow_empty_primary: bool,

    /// Rejects empty values in `check`.
    #[arg(long = "reject-empty-values")]
    pub reject_empty_values: bool,

    /// Drops origin entries that break the name/value rules.
    #[arg(long = "drop-invalid")]
    pub drop_invalid: bool,
}

impl GlobalOptions {
    /// Converts command-line flags to `(key, value)` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("log.level", level.to_string()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("log.file", path.display().to_string()));
        }

        if self.json_logs {
            overrides.push(("log.json", "true".to_string()));
        }

        if self.allow_empty_primary {
            overrides.push(("store.allow_empty_primary", "true".to_string()));
        }

        if self.reject_empty_values {
            overrides.push(("store.empty_values", "reject".to_string()));
        }

        if self.drop_invalid {
            overrides.push(("store.admission", "drop-invalid".to_string()));
        }

        overrides
    }
}
