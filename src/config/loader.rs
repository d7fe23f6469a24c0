// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("envstore.toml")
//!   .add_toml_file(--ini)          repeatable, required
//!   .with_env_prefix("ENVSTORE")   applied last among sources
//!   .set(key, value)               CLI overrides, highest priority
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// A TOML source recorded by the loader, in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file that must exist.
    File(PathBuf),
    /// A file that existed when it was added.
    OptionalFile(PathBuf),
    /// TOML text passed directly.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::OptionalFile(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
        }
    }
}

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    env_source: Option<config::Map<String, String>>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_source: None,
            sources: Vec::new(),
        }
    }

    fn add_toml(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Adds a required TOML configuration file.
    ///
    /// The file is read by `build()`, which fails if it is missing or invalid.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.add_toml(path, true);
        loader.sources.push(ConfigSource::File(path.to_path_buf()));
        loader
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.add_toml(path, false);
        if path.exists() {
            loader
                .sources
                .push(ConfigSource::OptionalFile(path.to_path_buf()));
        }
        loader
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `{PREFIX}_{SECTION}__{KEY}` environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Uses `vars` instead of the process environment for the prefixed
    /// variables. Has no effect without [`with_env_prefix`](Self::with_env_prefix).
    #[must_use]
    pub fn with_env_source<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_source = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets a configuration override, such as `("store.admission", "drop-invalid")`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid configuration path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .with_context(|| format!("invalid override for '{key}'"))?;
        Ok(self)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into `Config`.
    /// - A `context` entry is not of the form `NAME=value`.
    pub fn build(self) -> Result<Config> {
        for source in &self.sources {
            if let ConfigSource::File(path) = source
                && !path.exists()
            {
                return Err(ConfigError::NotFound(path.display().to_string()).into());
            }
        }

        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(self.env_source.clone()),
            ),
            None => self.builder,
        };

        let config: Config = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .context("failed to load configuration")?;
        config.validate()?;

        tracing::debug!(
            sources = self.sources.len(),
            env_prefix = self.env_prefix.as_deref().unwrap_or("-"),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// TOML sources added so far; missing optional files are not listed.
    #[must_use]
    pub fn loaded_files(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// One numbered line per source, as printed by `inis`.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
