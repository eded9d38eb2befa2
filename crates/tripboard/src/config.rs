//! Configuration management for tripboard.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::clock::DemoZone;
use crate::error::{Error, Result};
use crate::itinerary::Itinerary;
use crate::status::Thresholds;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "tripboard";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "TRIPBOARD_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRIPBOARD_`, `__` between sections
///    and keys, e.g. `TRIPBOARD_BOARD__TICK_INTERVAL_MS`)
/// 2. TOML config file at `~/.config/tripboard/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board refresh and status windows.
    pub board: BoardConfig,
    /// Demo clock configuration.
    pub clock: ClockConfig,
    /// Where the itinerary comes from.
    pub itinerary: ItineraryConfig,
}

/// Board-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Interval between board refreshes in milliseconds.
    pub tick_interval_ms: u64,
    /// How long before departure a leg shows as boarding, in minutes.
    pub boarding_window_minutes: u32,
    /// How long before departure a countdown is flagged urgent, in hours.
    pub urgent_window_hours: u32,
}

/// Clock-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// UTC offset that demo dates and times are read in, e.g. `+02:00`.
    /// Defaults to the operator's local zone.
    pub demo_utc_offset: Option<String>,
}

/// Itinerary-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryConfig {
    /// Path to an itinerary TOML file.
    /// Defaults to the built-in trip.
    pub path: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            boarding_window_minutes: 120,
            urgent_window_hours: 6,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `TRIPBOARD_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
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
        if self.board.tick_interval_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "tick_interval_ms must be greater than 0".to_string(),
            });
        }

        if self.board.boarding_window_minutes == 0 {
            return Err(Error::ConfigValidation {
                message: "boarding_window_minutes must be greater than 0".to_string(),
            });
        }

        if self.board.urgent_window_hours == 0 {
            return Err(Error::ConfigValidation {
                message: "urgent_window_hours must be greater than 0".to_string(),
            });
        }

        if let Some(offset) = &self.clock.demo_utc_offset {
            if DemoZone::parse_offset(offset).is_err() {
                return Err(Error::ConfigValidation {
                    message: format!("invalid demo_utc_offset: {offset}"),
                });
            }
        }

        Ok(())
    }

    /// Get the tick interval as a Duration.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.board.tick_interval_ms)
    }

    /// Get the status thresholds.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            boarding_window: chrono::Duration::minutes(i64::from(
                self.board.boarding_window_minutes,
            )),
            urgent_window: chrono::Duration::hours(i64::from(self.board.urgent_window_hours)),
        }
    }

    /// Get the zone demo input is read in.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured offset is malformed.
    pub fn demo_zone(&self) -> Result<DemoZone> {
        match &self.clock.demo_utc_offset {
            Some(offset) => DemoZone::parse_offset(offset),
            None => Ok(DemoZone::Local),
        }
    }

    /// Load the configured itinerary, falling back to the built-in trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file is missing or invalid.
    pub fn load_itinerary(&self) -> Result<Itinerary> {
        match &self.itinerary.path {
            Some(path) => Itinerary::load(path),
            None => Itinerary::builtin(),
        }
    }
}
