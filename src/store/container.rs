// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The variable store and its copy-on-write snapshots.
//!
//! ```text
//! VariableStore
//!   entries: Arc<BTreeMap<String, Entry>>   snapshot() clones the Arc,
//!                                           set/unset go through make_mut
//!   primary_table / secondary_table         written through on set/unset
//!
//! set_in:   validate -> primary.lookup/write -> secondary.write -> memory
//!                              |                      |
//!                          SetFailed        primary.restore, SetFailed
//! unset_in: held in origin? -> primary.lookup/remove -> secondary.remove -> memory
//!                              |                      |
//!                          UnsetFailed      primary.restore, UnsetFailed
//!
//! set / unset select both origins; a single origin skips the other table.
//! ```

use bon::bon;
use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry as MapEntry};
use std::io;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::context::ContextTable;
use super::origin::{OriginTable, RawScalar, RawTable};
use super::process::ProcessEnv;
use super::types::{Admission, Entries, Entry, Origins, StoreOptions, Variable};
use super::validate;
use crate::error::{EnvError, EnvResult};

/// Validated, merged view of the primary and secondary origin tables.
///
/// Built once per session and mutated through [`set`](Self::set) and
/// [`unset`](Self::unset), which also write through to both tables.
/// Mutation takes `&mut self`; wrap the store in
/// [`SharedStore`](super::SharedStore) to share it between threads.
pub struct VariableStore {
    entries: Arc<Entries>,
    primary_table: Box<dyn OriginTable>,
    secondary_table: Box<dyn OriginTable>,
    options: StoreOptions,
}

impl std::fmt::Debug for VariableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableStore")
            .field("count", &self.entries.len())
            .field("primary_table", &self.primary_table.name())
            .field("secondary_table", &self.secondary_table.name())
            .field("options", &self.options)
            .finish()
    }
}

#[bon]
impl VariableStore {
    /// Builds a store from the two origin tables.
    ///
    /// `primary` and `secondary` inject snapshots instead of reading the live
    /// tables; the live tables still receive writes from `set`/`unset`.
    /// By default the primary table is the process environment and the
    /// secondary table is a fresh, empty [`ContextTable`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::EnvironmentUnavailable`] if a live table cannot be
    /// read, or, unless `options.allow_empty_primary` is set, if:
    /// - the live primary table is empty even after its fallback read, or
    /// - an injected primary snapshot and the secondary snapshot are both empty.
    ///
    /// # Example
    ///
    /// ```
    /// use envstore::store::{ContextTable, VariableStore};
    /// use envstore::store::origin::text_table;
    ///
    /// let store = VariableStore::builder()
    ///     .primary_table(Box::new(ContextTable::named("environment")))
    ///     .secondary_table(Box::new(ContextTable::new()))
    ///     .primary(text_table([("K", "A")]))
    ///     .secondary(text_table([("K", "B")]))
    ///     .build()?;
    /// assert_eq!(store.get("K")?, "B");
    /// # Ok::<(), envstore::error::EnvError>(())
    /// ```
    #[builder]
    pub fn new(
        #[builder(default = Box::new(ProcessEnv::new()))] primary_table: Box<dyn OriginTable>,
        #[builder(default = Box::new(ContextTable::new()))] secondary_table: Box<dyn OriginTable>,
        primary: Option<RawTable>,
        secondary: Option<RawTable>,
        #[builder(default)] options: StoreOptions,
    ) -> EnvResult<Self> {
        let secondary = match secondary {
            Some(table) => table,
            None => read_table(secondary_table.as_ref())?,
        };

        // An injected empty primary is only fatal when there is nothing else to
        // serve; an empty live primary is fatal on its own.
        let injected = primary.is_some();
        let primary = match primary {
            Some(table) => table,
            None => {
                let table = read_table(primary_table.as_ref())?;
                if table.is_empty() {
                    debug!(table = primary_table.name(), "Primary table empty, trying fallback");
                    primary_table
                        .read_fallback()
                        .map_err(|source| EnvError::EnvironmentUnavailable {
                            table: primary_table.name(),
                            source: Some(source),
                        })?
                } else {
                    table
                }
            }
        };

        let unusable = primary.is_empty() && (!injected || secondary.is_empty());
        if unusable && !options.allow_empty_primary {
            return Err(EnvError::EnvironmentUnavailable {
                table: primary_table.name(),
                source: None,
            });
        }

        let entries = merge(primary, secondary, &options);
        debug!(
            count = entries.len(),
            primary = primary_table.name(),
            secondary = secondary_table.name(),
            "Variable store initialized"
        );

        Ok(Self {
            entries: Arc::new(entries),
            primary_table,
            secondary_table,
            options,
        })
    }
}

impl VariableStore {
    /// Returns the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NotFound`] if `name` is absent.
    pub fn get(&self, name: &str) -> EnvResult<&str> {
        self.entries
            .get(name)
            .map(|e| e.value.as_str())
            .ok_or_else(|| EnvError::not_found(name))
    }

    /// Returns the value of `name`, or `default` if absent.
    ///
    /// `default` is returned as given, without validation.
    #[must_use]
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.entries.get(name).map_or(default, |e| e.value.as_str())
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of variables held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Origins `name` is known to be present in.
    #[must_use]
    pub fn origins(&self, name: &str) -> Option<Origins> {
        self.entries.get(name).map(|e| e.origins)
    }

    /// Returns the value of `name` as seen through `origin` alone.
    ///
    /// For [`Origins::PRIMARY`] this is the primary value even when a
    /// secondary entry shadows it in the merged view.
    #[must_use]
    pub fn get_in(&self, name: &str, origin: Origins) -> Option<&str> {
        self.entries.get(name).and_then(|e| e.value_in(origin))
    }

    /// Whether any of the tables in `origin` holds `name`.
    #[must_use]
    pub fn has_in(&self, name: &str, origin: Origins) -> bool {
        self.entries
            .get(name)
            .is_some_and(|e| e.origins.intersects(origin))
    }

    /// Like [`get_in`](Self::get_in), with a default for an absent name.
    #[must_use]
    pub fn get_in_or<'a>(&'a self, name: &str, origin: Origins, default: &'a str) -> &'a str {
        self.get_in(name, origin).unwrap_or(default)
    }

    /// Returns a copy of all variables.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect()
    }

    /// Returns a copy of the variables present in `origin`.
    #[must_use]
    pub fn to_origin_map(&self, origin: Origins) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .filter_map(|(k, e)| e.value_in(origin).map(|v| (k.clone(), v.to_owned())))
            .collect()
    }

    /// Returns a snapshot of the current variables.
    ///
    /// The snapshot shares storage with the store until the next mutation,
    /// and never observes mutations made after it was taken.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: Arc::clone(&self.entries),
        }
    }

    /// Iterates over the variables in name order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    /// Validates and sets a variable, writing it through to both origin tables.
    ///
    /// Both tables are written before the in-memory view changes. If the
    /// secondary write fails the primary table gets back the raw value it
    /// held before, so a failed `set` leaves the store and the tables as
    /// they were.
    ///
    /// # Errors
    ///
    /// - [`EnvError::InvalidName`] / [`EnvError::InvalidValue`] for the first
    ///   broken rule, name first.
    /// - [`EnvError::SetFailed`] if a table rejects the write.
    pub fn set(&mut self, name: &str, value: &str) -> EnvResult<()> {
        self.set_in(name, value, Origins::all())
    }

    /// Sets a pre-validated [`Variable`].
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set); the value is re-checked against this
    /// store's empty-value policy.
    pub fn set_variable(&mut self, variable: &Variable) -> EnvResult<()> {
        let (name, value) = variable.as_pair();
        self.set(name, value)
    }

    /// Sets a variable in the tables selected by `origin` only.
    ///
    /// Setting only the primary table under an existing secondary entry
    /// leaves the merged value alone; the new value shows through
    /// [`get_in`](Self::get_in). An empty `origin` validates and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    pub fn set_in(&mut self, name: &str, value: &str, origin: Origins) -> EnvResult<()> {
        validate::validate(name, value, self.options.empty_values)
            .map_err(|e| e.for_name(name))?;

        self.write_through(name, origin, |table| table.write(name, value))
            .map_err(|failure| EnvError::SetFailed {
                name: name.to_owned(),
                table: failure.table,
                source: failure.source,
            })?;

        let (mut primary, mut secondary) = self
            .entries
            .get(name)
            .map(Entry::split)
            .unwrap_or_default();
        if origin.contains(Origins::PRIMARY) {
            primary = Some(value.to_owned());
        }
        if origin.contains(Origins::SECONDARY) {
            secondary = Some(value.to_owned());
        }
        self.commit(name, primary, secondary);
        debug!(name, origin = %origin, "Set variable");
        Ok(())
    }

    /// Removes a variable from the store and from both origin tables.
    ///
    /// # Errors
    ///
    /// - [`EnvError::NotFound`] if `name` is absent; nothing changes.
    /// - [`EnvError::UnsetFailed`] if a table rejects the removal; the
    ///   variable stays present.
    pub fn unset(&mut self, name: &str) -> EnvResult<()> {
        self.unset_in(name, Origins::all())
    }

    /// Removes a variable from the tables selected by `origin` only.
    ///
    /// The variable stays in the store while another origin still holds it.
    ///
    /// # Errors
    ///
    /// - [`EnvError::NotFound`] if none of the selected origins holds `name`.
    /// - [`EnvError::UnsetFailed`] as for [`unset`](Self::unset).
    pub fn unset_in(&mut self, name: &str, origin: Origins) -> EnvResult<()> {
        if !self.has_in(name, origin) {
            return Err(EnvError::not_found(name));
        }

        self.write_through(name, origin, |table| table.remove(name))
            .map_err(|failure| EnvError::UnsetFailed {
                name: name.to_owned(),
                table: failure.table,
                source: failure.source,
            })?;

        let (mut primary, mut secondary) = self
            .entries
            .get(name)
            .map(Entry::split)
            .unwrap_or_default();
        if origin.contains(Origins::PRIMARY) {
            primary = None;
        }
        if origin.contains(Origins::SECONDARY) {
            secondary = None;
        }
        self.commit(name, primary, secondary);
        debug!(name, origin = %origin, "Unset variable");
        Ok(())
    }

    /// Applies `change` to the selected tables, primary first.
    ///
    /// The primary table's raw value is captured before it is touched and
    /// put back if the secondary table then fails.
    fn write_through(
        &self,
        name: &str,
        origin: Origins,
        change: impl Fn(&dyn OriginTable) -> io::Result<()>,
    ) -> Result<(), TableFailure> {
        let primary = self.primary_table.as_ref();
        let secondary = self.secondary_table.as_ref();

        let previous = if origin.contains(Origins::PRIMARY) {
            let previous = primary
                .lookup(name)
                .map_err(|source| TableFailure::new(primary, source))?;
            change(primary).map_err(|source| TableFailure::new(primary, source))?;
            Some(previous)
        } else {
            None
        };

        if origin.contains(Origins::SECONDARY)
            && let Err(source) = change(secondary)
        {
            if let Some(previous) = previous {
                self.restore_primary(name, previous.as_ref());
            }
            return Err(TableFailure::new(secondary, source));
        }
        Ok(())
    }

    /// Replaces the in-memory entry; both values `None` removes it.
    fn commit(&mut self, name: &str, primary: Option<String>, secondary: Option<String>) {
        let entries = Arc::make_mut(&mut self.entries);
        match Entry::join(primary, secondary) {
            Some(entry) => {
                entries.insert(name.to_owned(), entry);
            }
            None => {
                entries.remove(name);
            }
        }
    }

    /// Puts the primary table back to `previous` after a failed secondary write.
    fn restore_primary(&self, name: &str, previous: Option<&RawScalar>) {
        if let Err(e) = self.primary_table.restore(name, previous) {
            warn!(
                name,
                table = self.primary_table.name(),
                error = %e,
                "Failed to roll back origin table"
            );
        }
    }
}

/// A table that rejected a write or removal.
struct TableFailure {
    table: &'static str,
    source: io::Error,
}

impl TableFailure {
    fn new(table: &dyn OriginTable, source: io::Error) -> Self {
        Self {
            table: table.name(),
            source,
        }
    }
}

impl<'a> IntoIterator for &'a VariableStore {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A point-in-time view of a [`VariableStore`].
///
/// Iterating is lazy and can be repeated; every pass yields the same
/// entries in name order.
#[derive(Debug, Clone)]
pub struct Snapshot {
    entries: Arc<Entries>,
}

impl Snapshot {
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(name, value)` pairs in name order.
#[derive(Debug, Clone)]
pub struct Iter<'a>(btree_map::Iter<'a, String, Entry>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, e)| (k.as_str(), e.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

fn read_table(table: &dyn OriginTable) -> EnvResult<RawTable> {
    table
        .read()
        .map_err(|source| EnvError::EnvironmentUnavailable {
            table: table.name(),
            source: Some(source),
        })
}

/// Overlays `secondary` on `primary`, then drops non-text entries and applies
/// the admission policy.
fn merge(primary: RawTable, secondary: RawTable, options: &StoreOptions) -> Entries {
    // name -> (merged raw value, origins, text primary value when shadowed)
    let mut merged: BTreeMap<String, (RawScalar, Origins, Option<RawScalar>)> = BTreeMap::new();

    for (origin, table) in [(Origins::PRIMARY, primary), (Origins::SECONDARY, secondary)] {
        for (key, value) in table {
            let Some(name) = key.into_text() else {
                trace!(kind = value.kind(), "Skipping origin entry with non-text name");
                continue;
            };
            match merged.entry(name) {
                MapEntry::Vacant(slot) => {
                    slot.insert((value, origin, None));
                }
                MapEntry::Occupied(mut slot) => {
                    let (current, origins, shadowed) = slot.get_mut();
                    if origin == Origins::SECONDARY && *origins == Origins::PRIMARY {
                        *shadowed = Some(current.clone());
                    }
                    *current = value;
                    *origins |= origin;
                }
            }
        }
    }

    merged
        .into_iter()
        .filter_map(|(name, (value, origins, shadowed))| {
            let Some(value) = value.into_text() else {
                trace!(name = %name, "Skipping origin entry with non-text value");
                return None;
            };
            if let Err(e) = validate::validate(&name, &value, options.empty_values) {
                match options.admission {
                    Admission::PassThrough => {
                        debug!(name = %name, error = %e, "Admitting origin entry that breaks invariants");
                    }
                    Admission::DropInvalid => {
                        warn!(name = %name, error = %e, "Dropping invalid origin entry");
                        return None;
                    }
                }
            }
            let shadowed = shadowed.and_then(RawScalar::into_text);
            let origins = if shadowed.is_none() && origins == Origins::all() {
                // The primary value was not text, so only the secondary holds it.
                Origins::SECONDARY
            } else {
                origins
            };
            Some((
                name,
                Entry {
                    value,
                    origins,
                    shadowed,
                },
            ))
        })
        .collect()
}
