// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Validated store of environment and context variables.
//!
//! # Architecture
//!
//! ```text
//!   primary table            secondary table
//!   (ProcessEnv)             (ContextTable)
//!        |  read()                 |  read()
//!        v                         v
//!    RawTable  ---- merge ---- RawTable     secondary wins on collision
//!                     |
//!             drop non-text entries
//!             apply Admission policy
//!                     v
//!              VariableStore  (Arc<BTreeMap>, copy-on-write)
//!     get/get_or/has/count/to_map/snapshot/iter
//!     set/unset --validate--> write through to both tables
//! ```
//!
//! - **Deterministic order**: entries iterate by name
//! - **Write-through**: a successful `set`/`unset` is visible in both tables
//! - **Rollback**: a failed table write leaves store and tables unchanged

pub mod container;
pub mod context;
pub mod origin;
pub mod process;
pub mod shared;
pub mod types;
pub mod validate;


pub use container::{Snapshot, VariableStore};
pub use context::ContextTable;
pub use origin::{OriginTable, RawScalar, RawTable};
pub use process::ProcessEnv;
pub use shared::SharedStore;
pub use types::{Admission, EmptyValues, Origins, StoreOptions, Variable};
pub use validate::{ValidationError, validate};

/// Builds a store over the live process environment and `context`.
///
/// # Errors
///
/// See [`VariableStore::new`].
pub fn live_store(
    context: ContextTable,
    options: StoreOptions,
) -> crate::error::EnvResult<VariableStore> {
    VariableStore::builder()
        .primary_table(Box::new(ProcessEnv::new()))
        .secondary_table(Box::new(context))
        .options(options)
        .build()
}
