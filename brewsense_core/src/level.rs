//! Consumable level tracking.
//!
//! Levels are only overridden on debounced rising edges: fill forces full,
//! empty forces empty, fill wins when both arrive in the same tick. Between
//! edges the level belongs to the external consumable manager, which may
//! deplete it between ticks without being clobbered here.

use brewsense_common::consts::{CONSUMABLE_COUNT, LEVEL_EMPTY, LEVEL_FULL};
use brewsense_common::io::Consumable;

/// Which override rule fired for a channel in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOverride {
    Filled,
    Emptied,
}

/// Apply the fill/empty priority rule to one level.
///
/// Guards are ordered: fill first, then empty, otherwise untouched.
#[inline]
pub fn level_update(fill_edge: bool, empty_edge: bool, level: &mut u8) -> Option<LevelOverride> {
    if fill_edge {
        *level = LEVEL_FULL;
        Some(LevelOverride::Filled)
    } else if empty_edge {
        *level = LEVEL_EMPTY;
        Some(LevelOverride::Emptied)
    } else {
        None
    }
}

/// The four tracked consumable levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumableLevels {
    levels: [u8; CONSUMABLE_COUNT],
}

impl Default for ConsumableLevels {
    fn default() -> Self {
        Self {
            levels: [LEVEL_FULL; CONSUMABLE_COUNT],
        }
    }
}

impl ConsumableLevels {
    #[inline]
    pub fn get(&self, consumable: Consumable) -> u8 {
        self.levels[consumable.index()]
    }

    /// Run the tracker for one consumable.
    #[inline]
    pub fn apply_edges(
        &mut self,
        consumable: Consumable,
        fill_edge: bool,
        empty_edge: bool,
    ) -> Option<LevelOverride> {
        level_update(fill_edge, empty_edge, &mut self.levels[consumable.index()])
    }

    /// Overwrite a level (consumable-manager hook).
    #[inline]
    pub fn set(&mut self, consumable: Consumable, value: u8) {
        self.levels[consumable.index()] = value;
    }

    /// Lower a level, saturating at empty. Returns the new level.
    #[inline]
    pub fn deplete(&mut self, consumable: Consumable, amount: u8) -> u8 {
        let level = &mut self.levels[consumable.index()];
        *level = level.saturating_sub(amount);
        *level
    }

    /// All levels back to full.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
