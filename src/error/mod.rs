// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 EnvError
//!                     |
//!   +--------+--------+--------+--------+--------+
//!   |        |        |        |        |        |
//!   v        v        v        v        v        v
//! Invalid  Invalid  NotFound  Environ  Set     Unset
//! Name     Value              Unavail  Failed  Failed
//!   |        |                         io::Error source
//!   v        v
//! NameViolation / ValueViolation (which rule failed)
//!
//! ConfigError   InvalidValue, NotFound
//! ```
//!
//! Store operations return [`EnvResult`]; the CLI and config layers use the
//! `anyhow`-based [`Result`].

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvError`].
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Errors raised by the variable store.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The name failed the name invariant.
    #[error("invalid variable name {name:?}: {violation}")]
    InvalidName {
        name: String,
        violation: NameViolation,
    },

    /// The value failed the value invariant.
    #[error("invalid value for variable {name:?}: {violation}")]
    InvalidValue {
        name: String,
        violation: ValueViolation,
    },

    /// The variable is not present and no default was given.
    #[error("variable {name:?} not found")]
    NotFound { name: String },

    /// No usable snapshot could be obtained from an origin table.
    ///
    /// `source` is `None` when the table was readable but empty and empty
    /// primary tables are not allowed.
    #[error("cannot get a list of the current variables from the {table}")]
    EnvironmentUnavailable {
        table: &'static str,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Writing to a backing origin table failed.
    #[error("failed to set variable {name:?} in {table}")]
    SetFailed {
        name: String,
        table: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Removing from a backing origin table failed.
    #[error("failed to unset variable {name:?} in {table}")]
    UnsetFailed {
        name: String,
        table: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl EnvError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_owned(),
        }
    }
}

/// Rule of the name invariant that a name violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameViolation {
    #[error("name must not be empty")]
    Empty,
    #[error("name must not have leading or trailing whitespace")]
    Untrimmed,
    #[error("name must not contain '='")]
    ContainsEquals,
    #[error("name must not contain a NUL byte")]
    ContainsNul,
}

/// Rule of the value invariant that a value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueViolation {
    #[error("value must not have leading or trailing whitespace")]
    Untrimmed,
    #[error("value must not contain a NUL byte")]
    ContainsNul,
    #[error("value must not be empty")]
    Empty,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}
