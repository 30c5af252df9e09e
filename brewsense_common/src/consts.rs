//! System-wide constants for the brewsense workspace.
//!
//! Single source of truth for thresholds and timing. None of these are
//! runtime-mutable; the only init-time input is the tick period, from which
//! cycle counts are derived (see [`crate::config::Timing`]).

use static_assertions::const_assert;

/// Debounce interval: a raw input must hold a new value this long [ms].
pub const DEBOUNCE_TIME_MS: u64 = 20;

/// Blink half-period [ms]. The shared blink signal toggles at 2 Hz
/// (0.5 s on, 0.5 s off).
pub const BLINK_HALF_PERIOD_MS: u64 = 500;

/// Consumable levels strictly below this render as a solid (low) indicator.
pub const LOW_THRESHOLD: u8 = 50;

/// Consumable levels strictly below this (and at or above `LOW_THRESHOLD`)
/// render as a blinking (warning) indicator.
pub const FULL_BOUNDARY: u8 = 200;

/// Level forced by a fill edge.
pub const LEVEL_FULL: u8 = u8::MAX;

/// Level forced by an empty edge.
pub const LEVEL_EMPTY: u8 = 0;

/// Default tick period in microseconds (1 kHz).
pub const DEFAULT_TICK_PERIOD_US: u64 = 1000;

/// Number of debounced input channels.
pub const CHANNEL_COUNT: usize = 12;

/// Number of tracked consumables.
pub const CONSUMABLE_COUNT: usize = 4;

/// Number of indicator outputs.
pub const INDICATOR_COUNT: usize = 8;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/brewsense/frontend.toml";

// Raw input word is a u16 bitmask.
const_assert!(CHANNEL_COUNT <= 16);
// Every consumable contributes a fill and an empty channel.
const_assert!(CONSUMABLE_COUNT * 2 < CHANNEL_COUNT);
const_assert!(LOW_THRESHOLD < FULL_BOUNDARY);
