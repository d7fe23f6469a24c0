// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared in-memory context table.
//!
//! Stands in for the host's server/request context. Clones share the same
//! table, so one handle can be given to a store while another observes the
//! writes it mirrors.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, RwLock};

use super::origin::{OriginTable, RawScalar, RawTable};

#[derive(Debug, Clone)]
pub struct ContextTable {
    name: &'static str,
    entries: Arc<RwLock<BTreeMap<String, RawScalar>>>,
}

impl Default for ContextTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextTable {
    /// Creates an empty table named `"request context"`.
    #[must_use]
    pub fn new() -> Self {
        Self::named("request context")
    }

    /// Creates an empty table with a custom name.
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            entries: Arc::default(),
        }
    }

    /// Creates a table pre-filled with `entries`.
    #[must_use]
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<RawScalar>,
    {
        let table = Self::new();
        if let Ok(mut guard) = table.entries.write() {
            guard.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
        table
    }

    /// Inserts a raw entry without validation, as a foreign writer would.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<RawScalar>) {
        if let Ok(mut guard) = self.entries.write() {
            guard.insert(name.into(), value.into());
        }
    }

    /// Returns the text value for `name`, if present and textual.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.entries
            .read()
            .ok()?
            .get(name)
            .and_then(RawScalar::as_text)
            .map(str::to_owned)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .is_ok_and(|guard| guard.contains_key(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |guard| guard.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> io::Error {
    io::Error::other("context table lock poisoned")
}

impl OriginTable for ContextTable {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self) -> io::Result<RawTable> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard
            .iter()
            .map(|(k, v)| (RawScalar::Text(k.clone()), v.clone()))
            .collect())
    }

    fn lookup(&self, name: &str) -> io::Result<Option<RawScalar>> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.get(name).cloned())
    }

    fn write(&self, name: &str, value: &str) -> io::Result<()> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        guard.insert(name.to_owned(), RawScalar::Text(value.to_owned()));
        Ok(())
    }

    fn remove(&self, name: &str) -> io::Result<()> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        guard.remove(name);
        Ok(())
    }

    fn restore(&self, name: &str, previous: Option<&RawScalar>) -> io::Result<()> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        match previous {
            Some(value) => guard.insert(name.to_owned(), value.clone()),
            None => guard.remove(name),
        };
        Ok(())
    }
}
