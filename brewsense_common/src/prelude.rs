//! Prelude module for common re-exports.
//!
//! ```rust
//! use brewsense_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, FrontEndConfig, SharedConfig, Timing};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{
    CHANNEL_COUNT, CONSUMABLE_COUNT, FULL_BOUNDARY, INDICATOR_COUNT, LEVEL_EMPTY, LEVEL_FULL,
    LOW_THRESHOLD,
};

// ─── I/O ────────────────────────────────────────────────────────────
pub use crate::io::{Consumable, Indicator, InputBits, InputChannel};

// ─── Status ─────────────────────────────────────────────────────────
pub use crate::status::{IndicatorFrame, IndicatorState, Snapshot, StatusFlags};

// ─── Board ──────────────────────────────────────────────────────────
pub use crate::board::{BoardError, BoardFactory, BoardIo};
