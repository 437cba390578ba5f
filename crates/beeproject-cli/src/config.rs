//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `BEEPROJECT__<SECTION>__<KEY>` environment variables (a `.env` file is
//!    loaded into the environment first)
//! 3. The file passed with `--config`, otherwise `./.beeproject.toml` and the
//!    platform config file
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Name of the per-directory config file.
pub const LOCAL_CONFIG: &str = ".beeproject.toml";

const ENV_PREFIX: &str = "BEEPROJECT";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Default option values for new projects.
    pub defaults: Defaults,
    pub output: OutputConfig,
}

/// Values used when `beeproject new` is not given the matching flag.
///
/// Anything left as `None` is filled in by the generator itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    pub email: Option<String>,
    pub license: Option<String>,
    pub url: Option<String>,
    pub python_version: Option<String>,
    /// Extensions enabled on every run, by name.
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from every source, see the module docs.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default())
                .map_err(|e| CliError::config("cannot serialise defaults", e))?,
        );

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml).required(true)),
            None => builder
                .add_source(
                    File::from(Self::global_path())
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(
                    File::from(PathBuf::from(LOCAL_CONFIG))
                        .format(FileFormat::Toml)
                        .required(false),
                ),
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.extensions"),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| CliError::config("cannot load configuration", e))
    }

    /// Path of the user-wide configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to the local file when
    /// no home directory can be determined.
    pub fn global_path() -> PathBuf {
        directories::ProjectDirs::from("org", "beeproject", "beeproject")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    /// The file `load(None)` would read last, if it exists.
    pub fn active_path(config_file: Option<&Path>) -> Option<PathBuf> {
        match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => [PathBuf::from(LOCAL_CONFIG), Self::global_path()]
                .into_iter()
                .find(|p| p.is_file()),
        }
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::config("cannot serialise configuration", e))
    }

    /// Look up a dotted key such as `defaults.author`.
    pub fn get(&self, key: &str) -> CliResult<serde_json::Value> {
        let root = serde_json::to_value(self)
            .map_err(|e| CliError::config("cannot serialise configuration", e))?;
        key.split('.')
            .try_fold(&root, |value, segment| value.get(segment))
            .cloned()
            .ok_or_else(|| CliError::UnknownConfigKey { key: key.to_owned() })
    }
}
