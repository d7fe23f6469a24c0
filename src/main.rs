// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> VariableStore --> Command Dispatch
//!   Get | Has | Count | List | Export | Check | Options | Inis | Version
//! ```

use std::process::ExitCode;

use envstore::cli::global::GlobalOptions;
use envstore::cli::{self, Command};
use envstore::cmd::config::{run_inis_command, run_options_command};
use envstore::cmd::list::{run_export_command, run_list_command};
use envstore::cmd::query::{
    run_check_command, run_count_command, run_get_command, run_has_command,
};
use envstore::config::loader::ConfigLoader;
use envstore::config::Config;
use envstore::error::Result;
use envstore::logging::init_logging;
use envstore::store::{VariableStore, live_store};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_INI: &str = "envstore.toml";
const ENV_PREFIX: &str = "ENVSTORE";

fn main() -> ExitCode {
    let cli = cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<ExitCode> {
    let command = match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(ExitCode::SUCCESS);
        }
        Some(command) => command,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            anyhow::bail!("No command specified");
        }
    };

    let loader = build_config_loader(&cli.global)?;
    if matches!(command, Command::Inis) {
        run_inis_command(&loader);
        return Ok(ExitCode::SUCCESS);
    }

    let config = loader.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })?;
    let _log_guard = init_logging(&config.log.to_log_config())?;

    match command {
        Command::Options => run_options_command(&config),
        Command::Check(args) => run_check_command(args, &config)?,
        Command::Get(args) => run_get_command(args, &open_store(cli, &config)?)?,
        Command::Has(args) => {
            if !run_has_command(args, &open_store(cli, &config)?) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Count => run_count_command(&open_store(cli, &config)?),
        Command::List(args) => run_list_command(args, &open_store(cli, &config)?),
        Command::Export(args) => run_export_command(args, &open_store(cli, &config)?)?,
        Command::Version | Command::Inis => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_ini {
        loader = loader.add_toml_file_optional(DEFAULT_INI);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    Ok(loader)
}

fn open_store(cli: &cli::Cli, config: &Config) -> Result<VariableStore> {
    let context = config.context_table(cli.global.context.iter().map(String::as_str))?;
    Ok(live_store(context, config.store)?)
}
