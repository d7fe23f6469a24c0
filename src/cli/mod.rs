// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for envstore using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! envstore [global options] <command>
//! get NAME [--default VALUE]
//! has NAME
//! count
//! list [--origin primary|secondary|all]
//! export [--format env|json]
//! check NAME VALUE
//! options | inis | version
//! ```

pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::store::Origins;
use clap::{Parser, Subcommand, ValueEnum};

/// Validated view of the process environment and request context.
#[derive(Debug, Parser)]
#[command(
    name = "envstore",
    author,
    version,
    about = "Validated environment variable store",
    long_about = "envstore Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Merges the process environment with a request context table\n\
                  (context entries win) and queries the result.",
    after_help = "CONFIG FILES:\n\n\
                  envstore loads `envstore.toml` from the current directory if it\n\
                  exists, then every file given with --ini, in order. ENVSTORE_*\n\
                  environment variables and command-line flags override both.\n\
                  Use --no-default-ini to skip `envstore.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used.
    Inis,

    /// Prints the value of a variable.
    Get(GetArgs),

    /// Exits with success if a variable is present.
    Has(HasArgs),

    /// Prints the number of variables.
    Count,

    /// Lists variables with the origins holding them.
    List(ListArgs),

    /// Prints all variables.
    Export(ExportArgs),

    /// Checks whether a name/value pair could be set.
    Check(CheckArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct GetArgs {
    /// Variable name.
    pub name: String,

    /// Printed when the variable is absent, instead of failing.
    #[arg(short = 'd', long = "default", value_name = "VALUE")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct HasArgs {
    /// Variable name.
    pub name: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Restricts the listing to one origin.
    #[arg(short = 'o', long = "origin", value_enum, default_value_t = OriginArg::All)]
    pub origin: OriginArg,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExportArgs {
    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = ExportFormat::Env)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Variable name.
    pub name: String,

    /// Variable value.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Origin selector for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OriginArg {
    /// The process environment.
    Primary,
    /// The request context.
    Secondary,
    /// Both, merged.
    All,
}

impl OriginArg {
    #[must_use]
    pub const fn origins(self) -> Origins {
        match self {
            Self::Primary => Origins::PRIMARY,
            Self::Secondary => Origins::SECONDARY,
            Self::All => Origins::all(),
        }
    }
}

/// Output format for `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// `NAME=value` lines.
    Env,
    /// A JSON object.
    Json,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
