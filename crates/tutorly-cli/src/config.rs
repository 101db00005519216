//! Configuration file loading with precedence handling.
//!
//! Precedence (highest first): command-line flag, config file, built-in
//! default. A missing config file is fine; a malformed one is an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "tutorly";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "tutorly.json";
const LOG_FILE: &str = "tutorly.log";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Tracing filter directive used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
}

/// Values given on the command line, which win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// `<config_dir>/tutorly/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Reads the config file at `path`. `Ok(None)` when it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_config(&contents, path).map(Some)
}

fn parse_config(contents: &str, path: &Path) -> Result<ConfigFile, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Merges overrides, the config file and defaults.
pub fn resolve(file: Option<ConfigFile>, overrides: Overrides) -> Settings {
    let file = file.unwrap_or_default();
    Settings {
        data_file: overrides
            .data_file
            .or(file.data_file)
            .unwrap_or_else(|| default_data_dir().join(DATA_FILE)),
        log_file: overrides
            .log_file
            .or(file.log_file)
            .unwrap_or_else(|| default_data_dir().join(LOG_FILE)),
        log_level: file
            .log_level
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    }
}
