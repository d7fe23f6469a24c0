// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Origin tables: the externally owned key/value sources behind the store.
//!
//! ```text
//! OriginTable (Send + Sync)
//!   read()          -> RawTable   snapshot at construction
//!   read_fallback() -> RawTable   second attempt when read() is empty
//!   lookup(name)    -> RawScalar?  raw prior value, captured before a write
//!   write(name, value)            mirror of VariableStore::set
//!   remove(name)                  mirror of VariableStore::unset
//!   restore(name, RawScalar?)     undo of a write, used on rollback
//!
//! RawTable = Vec<(RawScalar, RawScalar)>, later duplicates win
//! RawScalar: Text | Bytes (non-UTF-8) | Number | Bool | Null
//! ```

use std::ffi::OsString;
use std::io;

/// A key or value as an origin table holds it.
///
/// Only [`RawScalar::Text`] may enter the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RawScalar {
    Text(String),
    Bytes(OsString),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl RawScalar {
    /// Returns the text if this scalar is a UTF-8 string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short kind name, used when logging filtered entries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Null => "null",
        }
    }
}

impl From<&str> for RawScalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for RawScalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<OsString> for RawScalar {
    fn from(s: OsString) -> Self {
        match s.into_string() {
            Ok(text) => Self::Text(text),
            Err(bytes) => Self::Bytes(bytes),
        }
    }
}

impl From<i64> for RawScalar {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for RawScalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A point-in-time snapshot of an origin table.
pub type RawTable = Vec<(RawScalar, RawScalar)>;

/// Builds a [`RawTable`] of text entries.
///
/// ```
/// use envstore::store::origin::text_table;
///
/// let table = text_table([("HOME", "/home/user")]);
/// assert_eq!(table.len(), 1);
/// ```
pub fn text_table<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> RawTable
where
    K: Into<String>,
    V: Into<String>,
{
    entries
        .into_iter()
        .map(|(k, v)| (RawScalar::Text(k.into()), RawScalar::Text(v.into())))
        .collect()
}

/// A process-wide key/value table the store reads from and writes through to.
pub trait OriginTable: Send + Sync {
    /// Human-readable table name for errors and logs.
    fn name(&self) -> &'static str;

    /// Reads the current contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    fn read(&self) -> io::Result<RawTable>;

    /// Alternate read used when [`read`](Self::read) yields nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the alternate source exists but cannot be read.
    fn read_fallback(&self) -> io::Result<RawTable> {
        Ok(Vec::new())
    }

    /// Returns the raw value of `name` as the table holds it right now.
    ///
    /// The default scans [`read`](Self::read); a later duplicate wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    fn lookup(&self, name: &str) -> io::Result<Option<RawScalar>> {
        Ok(self
            .read()?
            .into_iter()
            .filter(|(key, _)| key.as_text() == Some(name))
            .map(|(_, value)| value)
            .last())
    }

    /// Defines `name` as `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying primitive rejects the write.
    fn write(&self, name: &str, value: &str) -> io::Result<()>;

    /// Undefines `name`. Removing an absent name succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying primitive rejects the removal.
    fn remove(&self, name: &str) -> io::Result<()>;

    /// Puts back a value captured by [`lookup`](Self::lookup); `None` removes `name`.
    ///
    /// The default can only restore text.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::Unsupported`] for a non-text value the table
    /// cannot hold, or the error of the underlying write.
    fn restore(&self, name: &str, previous: Option<&RawScalar>) -> io::Result<()> {
        match previous {
            None => self.remove(name),
            Some(RawScalar::Text(value)) => self.write(name, value),
            Some(other) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("{} cannot hold a {} value", self.name(), other.kind()),
            )),
        }
    }
}
