// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `list` and `export` commands.

use crate::cli::{ExportArgs, ExportFormat, ListArgs, OriginArg};
use crate::error::Result;
use crate::store::{Origins, VariableStore};
use anyhow::Context;

/// Main handler for list command.
pub fn run_list_command(args: &ListArgs, store: &VariableStore) {
    let lines = format_list(args.origin, store);
    if lines.is_empty() {
        println!("No variables found");
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
}

/// Formats one `NAME=value` line per variable.
///
/// With [`OriginArg::All`] each line carries the origins holding the name;
/// a single origin lists that origin's own values, including primary values
/// hidden by the secondary table in the merged view.
#[must_use]
pub fn format_list(origin: OriginArg, store: &VariableStore) -> Vec<String> {
    match origin {
        OriginArg::All => store
            .iter()
            .map(|(name, value)| {
                let origins = store.origins(name).unwrap_or_else(Origins::empty);
                format!("{name}={value} [{origins}]")
            })
            .collect(),
        OriginArg::Primary | OriginArg::Secondary => store
            .to_origin_map(origin.origins())
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect(),
    }
}

/// Prints every variable in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run_export_command(args: &ExportArgs, store: &VariableStore) -> Result<()> {
    println!("{}", format_export(args.format, store)?);
    Ok(())
}

/// Renders every variable as `NAME=value` lines or a JSON object.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_export(format: ExportFormat, store: &VariableStore) -> Result<String> {
    match format {
        ExportFormat::Env => Ok(store
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("\n")),
        ExportFormat::Json => {
            serde_json::to_string_pretty(&store.to_map()).context("failed to serialize variables")
        }
    }
}
