//! Configuration management for flightlog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::book::QueryOptions;
use crate::error::{Error, Result};
use crate::flight::{FlightDuration, LONG_FLIGHT_THRESHOLD};
use crate::query::UPCOMING_COUNT;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name.
const CONFIG_DIR_NAME: &str = "flightlog";

/// Default flights file, relative to the working directory.
const DATA_FILE_NAME: &str = "flights.txt";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "FLIGHTLOG_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTLOG_`, `__` between levels)
/// 2. TOML config file at `~/.config/flightlog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Query configuration.
    pub query: QueryConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the flights file.
    /// Defaults to `flights.txt` in the working directory.
    pub data_file: Option<PathBuf>,
}

/// Query-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Flights strictly longer than this are long flights (`H:mm`).
    pub long_flight_threshold: FlightDuration,
    /// How many flights the upcoming view shows.
    pub upcoming_count: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            long_flight_threshold: LONG_FLIGHT_THRESHOLD,
            upcoming_count: UPCOMING_COUNT,
        }
    }
}

impl Config {
    /// Load configuration, reading the TOML file at `config_path` or at
    /// [`default_config_path`](Self::default_config_path).
    ///
    /// A config file that does not exist is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.query.upcoming_count == 0 {
            return Err(Error::ConfigValidation {
                message: "upcoming_count must be greater than 0".to_string(),
            });
        }

        if let Some(path) = &self.storage.data_file {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "data_file must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the flights file path, resolving the default if not set.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
    }

    /// Filter tunables for a [`FlightBook`](crate::FlightBook).
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            long_flight_threshold: self.query.long_flight_threshold,
            upcoming_count: self.query.upcoming_count,
        }
    }
}
