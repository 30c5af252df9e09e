//! Configuration loading traits and types.
//!
//! Every brewsense binary loads a single TOML file through [`ConfigLoader`].
//! The only timing input is the tick period; debounce and blink cycle
//! counts are derived from it once, at init, into an immutable [`Timing`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use brewsense_common::config::{ConfigError, FrontEndConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = FrontEndConfig::load_validated(Path::new("frontend.toml"))?;
//!     let timing = config.timing.derive()?;
//!     println!("debounce = {} ticks", timing.debounce_cycles);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::consts::{BLINK_HALF_PERIOD_MS, DEBOUNCE_TIME_MS, DEFAULT_TICK_PERIOD_US};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, per-tick tracing.
    Trace,
    /// Debounced transitions and level overrides.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages (tick overruns, scenario oddities).
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common configuration fields shared across brewsense applications.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "brewsense-frontend-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

// ─── Timing ─────────────────────────────────────────────────────────

/// Init-time tick configuration.
///
/// ```toml
/// [timing]
/// tick_period_us = 1000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Fixed tick period [µs].
    #[serde(default = "default_tick_period_us")]
    pub tick_period_us: u64,
}

fn default_tick_period_us() -> u64 {
    DEFAULT_TICK_PERIOD_US
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_period_us: DEFAULT_TICK_PERIOD_US,
        }
    }
}

impl TimingConfig {
    /// Validate and derive the cycle counts.
    pub fn derive(&self) -> Result<Timing, ConfigError> {
        Timing::from_tick_period_us(self.tick_period_us)
    }
}

/// Cycle counts derived from the fixed time constants and the tick period.
///
/// Immutable once built: there is no variable sampling rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Tick period [µs].
    pub tick_period_us: u64,
    /// Consecutive differing ticks before a debounced channel commits.
    pub debounce_cycles: u32,
    /// Ticks between blink toggles.
    pub blink_half_period_cycles: u32,
}

impl Timing {
    /// Derive cycle counts for the given tick period.
    ///
    /// Counts round up so a debounce never completes early, and never drop
    /// below one tick.
    ///
    /// # Errors
    ///
    /// `ValidationError` if the period is zero or longer than the debounce
    /// interval.
    pub fn from_tick_period_us(tick_period_us: u64) -> Result<Self, ConfigError> {
        if tick_period_us == 0 {
            return Err(ConfigError::ValidationError(
                "tick_period_us must be > 0".to_string(),
            ));
        }
        let debounce_us = DEBOUNCE_TIME_MS * 1000;
        if tick_period_us > debounce_us {
            return Err(ConfigError::ValidationError(format!(
                "tick_period_us ({tick_period_us}) exceeds the debounce interval ({debounce_us}µs)"
            )));
        }

        let debounce_cycles = cycles_for(debounce_us, tick_period_us)?;
        let blink_half_period_cycles = cycles_for(BLINK_HALF_PERIOD_MS * 1000, tick_period_us)?;

        Ok(Self {
            tick_period_us,
            debounce_cycles,
            blink_half_period_cycles,
        })
    }

    /// Build a timing with explicit cycle counts, bypassing derivation.
    ///
    /// Used by tests and benchmarks that want short, readable thresholds.
    /// Counts are clamped to at least one tick.
    pub const fn with_cycles(debounce_cycles: u32, blink_half_period_cycles: u32) -> Self {
        Self {
            tick_period_us: DEFAULT_TICK_PERIOD_US,
            debounce_cycles: if debounce_cycles == 0 { 1 } else { debounce_cycles },
            blink_half_period_cycles: if blink_half_period_cycles == 0 {
                1
            } else {
                blink_half_period_cycles
            },
        }
    }

    /// Tick period as a `Duration`.
    pub const fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_micros(self.tick_period_us)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_period_us: DEFAULT_TICK_PERIOD_US,
            debounce_cycles: (DEBOUNCE_TIME_MS * 1000 / DEFAULT_TICK_PERIOD_US) as u32,
            blink_half_period_cycles: (BLINK_HALF_PERIOD_MS * 1000 / DEFAULT_TICK_PERIOD_US)
                as u32,
        }
    }
}

/// `ceil(duration_us / period_us)`, at least 1, must fit a `u32` counter.
fn cycles_for(duration_us: u64, period_us: u64) -> Result<u32, ConfigError> {
    let cycles = duration_us.div_ceil(period_us).max(1);
    u32::try_from(cycles).map_err(|_| {
        ConfigError::ValidationError(format!(
            "{duration_us}µs at {period_us}µs/tick overflows the cycle counter"
        ))
    })
}

// ─── Board / Front-End Config ───────────────────────────────────────

/// Board driver selection.
///
/// ```toml
/// [board]
/// driver = "simulation"
/// scenario = "scenarios/bin0_empty.toml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    /// Registered driver name.
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Scenario script for the simulation driver.
    #[serde(default)]
    pub scenario: Option<PathBuf>,
    /// Publish the snapshot every N ticks (1 = every tick).
    #[serde(default = "default_publish_interval")]
    pub publish_interval: u32,
}

fn default_driver() -> String {
    "simulation".to_string()
}

fn default_publish_interval() -> u32 {
    100
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            scenario: None,
            publish_interval: default_publish_interval(),
        }
    }
}

/// Top-level front-end configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontEndConfig {
    /// Common fields.
    pub shared: SharedConfig,
    /// Tick configuration.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Board driver configuration.
    #[serde(default)]
    pub board: BoardConfig,
}

impl FrontEndConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.timing.derive()?;
        if self.board.driver.is_empty() {
            return Err(ConfigError::ValidationError(
                "board.driver cannot be empty".to_string(),
            ));
        }
        if self.board.publish_interval == 0 {
            return Err(ConfigError::ValidationError(
                "board.publish_interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate in one step.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}
