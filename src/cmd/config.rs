// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `inis` commands.

use crate::config::Config;
use crate::config::loader::ConfigLoader;

/// Prints the effective configuration, one `key = value` per line.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Prints the TOML sources the loader picked up.
pub fn run_inis_command(loader: &ConfigLoader) {
    for line in format_inis(loader) {
        println!("{line}");
    }
}

#[must_use]
pub fn format_inis(loader: &ConfigLoader) -> Vec<String> {
    let lines = loader.format_loaded_files();
    if lines.is_empty() {
        vec!["No configuration files loaded".to_string()]
    } else {
        lines
    }
}
