//! Settings read from a YAML configuration file
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Application settings. Every field has a default, so a file only needs the settings it changes.
///
/// ```yaml
/// log:
///   enabled: true
///   file: chessgame.log
///   level: debug
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings
    pub log: LogConfig,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether to write a log at all
    pub enabled: bool,
    /// Where to write the log
    pub file: PathBuf,
    /// One of off, error, warn, info, debug or trace
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            enabled: false,
            file: PathBuf::from("chessgame.log"),
            level: "info".to_owned(),
        }
    }
}

impl LogConfig {
    /// Returns the configured level, or `LevelFilter::Off` if logging is disabled.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLevel` if the level is not recognized.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        let level = parse_level(&self.level)?;

        Ok(if self.enabled { level } else { LevelFilter::Off })
    }
}

impl Config {
    /// Reads the configuration from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML for a `Config`.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let s = read_to_string(path).map_err(|err| ConfigError::Io(path.to_owned(), err))?;
        Config::from_yaml_str(&s)
    }

    /// Like `load`, but returns the default configuration if `path` does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Config::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Parses the configuration from a YAML string. An empty string gives the defaults.
    pub fn from_yaml_str(s: &str) -> Result<Config, ConfigError> {
        if s.trim().is_empty() {
            Ok(Config::default())
        } else {
            Ok(serde_yaml::from_str(s)?)
        }
    }

    /// Returns `~/.chessgame/config.yaml`, or `./config.yaml` if there is no home directory.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".chessgame"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.yaml")
    }
}

/// Parses a log level name.
///
/// # Errors
///
/// Returns `ConfigError::InvalidLevel` for anything other than off, error, warn, info, debug or
/// trace.
pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        level => Err(ConfigError::InvalidLevel(level.to_owned())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error reading or interpreting the configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(PathBuf, io::Error),
    /// The file is not valid YAML for a `Config`
    Yaml(serde_yaml::Error),
    /// Unknown log level
    InvalidLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            ConfigError::Yaml(err) => write!(f, "invalid configuration: {}", err),
            ConfigError::InvalidLevel(level) => write!(f, "{}: invalid log level", level),
        }
    }
}

impl std::error::Error for ConfigError { }

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}
