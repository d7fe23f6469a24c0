// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration for the envstore tool.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. envstore.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. ENVSTORE_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ENVSTORE_STORE__ALLOW_EMPTY_PRIMARY=true → store.allow_empty_primary = true
//! ENVSTORE_STORE__EMPTY_VALUES=reject      → store.empty_values = "reject"
//! ENVSTORE_LOG__LEVEL=4                    → log.level = 4
//! ```
//!
//! # Example
//!
//! ```toml
//! context = ["SERVER_NAME=localhost", "SERVER_PORT=8080"]
//!
//! [store]
//! allow_empty_primary = false
//! empty_values = "allow"       # or "reject"
//! admission = "pass-through"   # or "drop-invalid"
//!
//! [log]
//! level = 2
//! json = false
//! ```

pub mod loader;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::logging::{LogConfig, LogLevel};
use crate::store::{ContextTable, StoreOptions};

use loader::ConfigLoader;

/// Complete tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Entries seeded into the request context, as `NAME=value`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    /// Store construction and validation options.
    pub store: StoreOptions,
    /// Logging options.
    pub log: LogSettings,
}

/// `[log]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub level: LogLevel,
    pub file: Option<PathBuf>,
    pub json: bool,
}

impl LogSettings {
    /// Logging setup for these settings; the file gets at least `DEBUG`.
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig::builder()
            .with_console_level(self.level)
            .with_file_level(self.level.max(LogLevel::DEBUG))
            .maybe_with_log_file(self.file.clone())
            .with_json(self.json)
            .build()
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use envstore::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("envstore.toml")
    ///     .with_env_prefix("ENVSTORE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed `context` entry.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for entry in &self.context {
            parse_assignment(entry).map_err(|message| ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "context".to_string(),
                message,
            })?;
        }
        Ok(())
    }

    /// Builds the request context table from `context` plus `extra` entries.
    ///
    /// Later entries win. Entries are not validated here; the store's
    /// admission policy decides what happens to bad ones.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is not of the form `NAME=value`.
    pub fn context_table<'a>(
        &'a self,
        extra: impl IntoIterator<Item = &'a str>,
    ) -> Result<ContextTable> {
        let table = ContextTable::new();
        for entry in self.context.iter().map(String::as_str).chain(extra) {
            let (name, value) = parse_assignment(entry).map_err(anyhow::Error::msg)?;
            table.insert(name, value);
        }
        Ok(table)
    }

    /// Format configuration options for display, ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "store.allow_empty_primary",
            self.store.allow_empty_primary.to_string(),
        );
        options.insert("store.empty_values", self.store.empty_values.to_string());
        options.insert("store.admission", self.store.admission.to_string());
        options.insert("log.level", self.log.level.as_u8().to_string());
        options.insert(
            "log.file",
            self.log
                .file
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| p.display().to_string()),
        );
        options.insert("log.json", self.log.json.to_string());
        options.insert("context", self.context.join(";"));

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Splits `NAME=value` at the first `=`.
///
/// # Errors
///
/// Returns a message if there is no `=`.
pub fn parse_assignment(entry: &str) -> std::result::Result<(&str, &str), String> {
    entry
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=value, got '{entry}'"))
}
