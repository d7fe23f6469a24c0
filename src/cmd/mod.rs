// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), query (get, has, count, check), list (list, export)
//! ```
//!
//! Handlers that produce output have a `format_*` counterpart returning the
//! lines, so the output can be checked without capturing stdout.

pub mod config;
pub mod list;
pub mod query;
