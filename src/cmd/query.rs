// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-variable queries: `get`, `has`, `count`, `check`.

use crate::cli::{CheckArgs, GetArgs, HasArgs};
use crate::config::Config;
use crate::error::Result;
use crate::store::{VariableStore, validate};
use tracing::debug;

/// Prints the value of a variable, or the `--default` value if it is absent.
///
/// # Errors
///
/// Returns `EnvError::NotFound` if the variable is absent and no default
/// was given.
pub fn run_get_command(args: &GetArgs, store: &VariableStore) -> Result<()> {
    println!("{}", format_get(args, store)?);
    Ok(())
}

/// Resolves the value `get` prints.
///
/// # Errors
///
/// See [`run_get_command`].
pub fn format_get<'a>(args: &'a GetArgs, store: &'a VariableStore) -> Result<&'a str> {
    match args.default.as_deref() {
        Some(default) => Ok(store.get_or(&args.name, default)),
        None => Ok(store.get(&args.name)?),
    }
}

/// Reports whether a variable is present. Prints nothing.
#[must_use]
pub fn run_has_command(args: &HasArgs, store: &VariableStore) -> bool {
    let present = store.has(&args.name);
    debug!(name = %args.name, present, "Presence check");
    present
}

/// Prints the number of variables.
pub fn run_count_command(store: &VariableStore) {
    println!("{}", store.count());
}

/// Checks a name/value pair against the same rules `set` applies.
///
/// # Errors
///
/// Returns the validation error if the pair would be rejected.
pub fn run_check_command(args: &CheckArgs, config: &Config) -> Result<()> {
    validate(&args.name, &args.value, config.store.empty_values)
        .map_err(|e| e.for_name(&args.name))?;
    println!("ok");
    Ok(())
}
