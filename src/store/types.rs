// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for the variable store.
//!
//! ```text
//! Variable:     validated (name, value) pair, NAME=value on Display
//! Origins:      PRIMARY | SECONDARY (which tables hold an entry)
//! EmptyValues:  Allow (default) | Reject
//! Admission:    PassThrough (default) | DropInvalid
//! StoreOptions: allow_empty_primary + EmptyValues + Admission
//! Entry:        value + Origins, stored in a BTreeMap for deterministic order
//! ```

use bitflags::bitflags;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::validate;
use crate::error::EnvResult;

bitflags! {
    /// Origin tables an entry is known to be present in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Origins: u8 {
        /// The process environment.
        const PRIMARY = 0x01;
        /// The server/request context.
        const SECONDARY = 0x02;
    }
}

impl std::fmt::Display for Origins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (
            self.contains(Self::PRIMARY),
            self.contains(Self::SECONDARY),
        ) {
            (true, true) => write!(f, "primary+secondary"),
            (true, false) => write!(f, "primary"),
            (false, true) => write!(f, "secondary"),
            (false, false) => write!(f, "none"),
        }
    }
}

/// Whether `set` accepts the empty string as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyValues {
    #[default]
    Allow,
    Reject,
}

impl std::fmt::Display for EmptyValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// How origin entries that break the name/value invariants are treated
/// when the store is built.
///
/// Entries written through [`VariableStore::set`](super::VariableStore::set)
/// are always validated; this only governs pre-existing origin data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Admission {
    /// Keep them as-is, they reflect what the host actually holds.
    #[default]
    PassThrough,
    /// Drop them and log a warning.
    DropInvalid,
}

impl std::fmt::Display for Admission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PassThrough => write!(f, "pass-through"),
            Self::DropInvalid => write!(f, "drop-invalid"),
        }
    }
}

/// Options governing construction and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOptions {
    /// Accept an empty primary snapshot instead of failing construction.
    #[builder(setters(name = with_allow_empty_primary), default = false)]
    pub allow_empty_primary: bool,
    #[builder(setters(name = with_empty_values), default)]
    pub empty_values: EmptyValues,
    #[builder(setters(name = with_admission), default)]
    pub admission: Admission,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A validated name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Variable {
    name: String,
    value: String,
}

impl Variable {
    /// Validates and creates a variable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` or `InvalidValue` for the first broken rule.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        empty_values: EmptyValues,
    ) -> EnvResult<Self> {
        let name = name.into();
        let value = value.into();
        validate::validate(&name, &value, empty_values).map_err(|e| e.for_name(&name))?;
        Ok(Self { name, value })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.name, &self.value)
    }

    #[must_use]
    pub fn into_pair(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A stored value and the origins holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Entry {
    pub(super) value: String,
    pub(super) origins: Origins,
    /// Primary value hidden by a secondary entry with the same name.
    pub(super) shadowed: Option<String>,
}

impl Entry {
    /// Value as seen through `origin` alone.
    pub(super) fn value_in(&self, origin: Origins) -> Option<&str> {
        if !self.origins.intersects(origin) {
            return None;
        }
        if origin == Origins::PRIMARY {
            return Some(self.shadowed.as_deref().unwrap_or(&self.value));
        }
        Some(&self.value)
    }

    /// The entry as its `(primary, secondary)` values.
    pub(super) fn split(&self) -> (Option<String>, Option<String>) {
        (
            self.value_in(Origins::PRIMARY).map(str::to_owned),
            self.value_in(Origins::SECONDARY).map(str::to_owned),
        )
    }

    /// Rebuilds an entry from per-origin values; the secondary value wins.
    pub(super) fn join(primary: Option<String>, secondary: Option<String>) -> Option<Self> {
        let entry = match (primary, secondary) {
            (None, None) => return None,
            (Some(value), None) => Self {
                value,
                origins: Origins::PRIMARY,
                shadowed: None,
            },
            (None, Some(value)) => Self {
                value,
                origins: Origins::SECONDARY,
                shadowed: None,
            },
            (Some(primary), Some(value)) => Self {
                shadowed: (primary != value).then_some(primary),
                value,
                origins: Origins::all(),
            },
        };
        Some(entry)
    }
}

pub(super) type Entries = BTreeMap<String, Entry>;
