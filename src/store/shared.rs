// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-writer wrapper for sharing a store between threads.
//!
//! A mutation updates the in-memory view and both origin tables while
//! holding the write lock, so readers never see one without the other.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::container::{Snapshot, VariableStore};
use super::types::Origins;
use crate::error::EnvResult;

#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<VariableStore>>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: VariableStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // A panic while holding the lock cannot leave the store half-updated:
    // every mutation commits to memory as its last step.
    fn read(&self) -> RwLockReadGuard<'_, VariableStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VariableStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns an owned copy of the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `name` is absent.
    pub fn get(&self, name: &str) -> EnvResult<String> {
        self.read().get(name).map(str::to_owned)
    }

    #[must_use]
    pub fn get_or(&self, name: &str, default: &str) -> String {
        self.read().get_or(name, default).to_owned()
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.read().has(name)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.read().count()
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.read().to_map()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.read().snapshot()
    }

    /// See [`VariableStore::set`].
    ///
    /// # Errors
    ///
    /// Same as [`VariableStore::set`].
    pub fn set(&self, name: &str, value: &str) -> EnvResult<()> {
        self.write().set(name, value)
    }

    /// See [`VariableStore::unset`].
    ///
    /// # Errors
    ///
    /// Same as [`VariableStore::unset`].
    pub fn unset(&self, name: &str) -> EnvResult<()> {
        self.write().unset(name)
    }

    #[must_use]
    pub fn has_in(&self, name: &str, origin: Origins) -> bool {
        self.read().has_in(name, origin)
    }

    /// # Errors
    ///
    /// Same as [`VariableStore::set_in`].
    pub fn set_in(&self, name: &str, value: &str, origin: Origins) -> EnvResult<()> {
        self.write().set_in(name, value, origin)
    }

    /// # Errors
    ///
    /// Same as [`VariableStore::unset_in`].
    pub fn unset_in(&self, name: &str, origin: Origins) -> EnvResult<()> {
        self.write().unset_in(name, origin)
    }
}

impl From<VariableStore> for SharedStore {
    fn from(store: VariableStore) -> Self {
        Self::new(store)
    }
}
