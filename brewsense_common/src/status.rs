//! Derived status types and the readable snapshot.
//!
//! Everything here is plain data: the tick engine produces it, boards and
//! the process controller consume it.

use core::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};

use crate::consts::{INDICATOR_COUNT, LEVEL_FULL};
use crate::io::{Consumable, Indicator};

// ─── StatusFlags ────────────────────────────────────────────────────

/// Readiness and fault flags derived from the debounced override/error
/// channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    pub water_pressure_ok: bool,
    pub water_temp_ready: bool,
    pub system_fault: bool,
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self {
            water_pressure_ok: true,
            water_temp_ready: true,
            system_fault: false,
        }
    }
}

// ─── IndicatorState ─────────────────────────────────────────────────

/// Rendered state of one indicator lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum IndicatorState {
    #[default]
    Off = 0,
    Solid = 1,
    Blinking = 2,
}

impl IndicatorState {
    /// Physical drive level for the lamp given the shared blink phase.
    #[inline]
    pub const fn is_lit(self, blink: bool) -> bool {
        match self {
            Self::Off => false,
            Self::Solid => true,
            Self::Blinking => blink,
        }
    }
}

// ─── IndicatorFrame ─────────────────────────────────────────────────

/// The full set of indicator states for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndicatorFrame(pub [IndicatorState; INDICATOR_COUNT]);

impl IndicatorFrame {
    /// Lamp drive levels in indicator order.
    pub fn lamps(&self, blink: bool) -> [bool; INDICATOR_COUNT] {
        self.0.map(|s| s.is_lit(blink))
    }

    /// Iterate `(indicator, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, IndicatorState)> + '_ {
        Indicator::ALL.into_iter().map(|i| (i, self.0[i.index()]))
    }
}

impl Index<Indicator> for IndicatorFrame {
    type Output = IndicatorState;
    fn index(&self, indicator: Indicator) -> &IndicatorState {
        &self.0[indicator.index()]
    }
}

impl IndexMut<Indicator> for IndicatorFrame {
    fn index_mut(&mut self, indicator: Indicator) -> &mut IndicatorState {
        &mut self.0[indicator.index()]
    }
}

// ─── Snapshot ───────────────────────────────────────────────────────

/// Debounced and derived values exposed to the process controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub paper_filter_present: bool,
    pub bin0_level: u8,
    pub bin1_level: u8,
    pub creamer_level: u8,
    pub chocolate_level: u8,
    pub water_pressure_ok: bool,
    pub water_temp_ready: bool,
    pub system_fault: bool,
}

impl Snapshot {
    /// Level of one consumable.
    pub const fn level(&self, consumable: Consumable) -> u8 {
        match consumable {
            Consumable::Bin0 => self.bin0_level,
            Consumable::Bin1 => self.bin1_level,
            Consumable::Creamer => self.creamer_level,
            Consumable::Chocolate => self.chocolate_level,
        }
    }

    /// Status flags portion of the snapshot.
    pub const fn flags(&self) -> StatusFlags {
        StatusFlags {
            water_pressure_ok: self.water_pressure_ok,
            water_temp_ready: self.water_temp_ready,
            system_fault: self.system_fault,
        }
    }
}

impl Default for Snapshot {
    /// Power-on / reset snapshot.
    fn default() -> Self {
        let flags = StatusFlags::default();
        Self {
            paper_filter_present: false,
            bin0_level: LEVEL_FULL,
            bin1_level: LEVEL_FULL,
            creamer_level: LEVEL_FULL,
            chocolate_level: LEVEL_FULL,
            water_pressure_ok: flags.water_pressure_ok,
            water_temp_ready: flags.water_temp_ready,
            system_fault: flags.system_fault,
        }
    }
}
