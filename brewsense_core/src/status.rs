//! Readiness and fault flags.
//!
//! Pure mapping from the debounced override/error channels; no memory
//! beyond the debounced inputs themselves.

use brewsense_common::io::{InputBits, InputChannel};
use brewsense_common::status::StatusFlags;

/// Derive the status flags from the three debounced inputs.
#[inline]
pub const fn derive_status(pressure_override: bool, temp_override: bool, error: bool) -> StatusFlags {
    StatusFlags {
        water_pressure_ok: !pressure_override,
        water_temp_ready: !temp_override,
        system_fault: error,
    }
}

/// Same as [`derive_status`], reading the debounced word.
#[inline]
pub const fn derive_from(debounced: InputBits) -> StatusFlags {
    derive_status(
        debounced.get(InputChannel::PressureOverride),
        debounced.get(InputChannel::TempOverride),
        debounced.get(InputChannel::Error),
    )
}
