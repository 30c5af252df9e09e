//! Indicator outputs, one per monitored quantity.

use core::fmt;
use serde::{Deserialize, Serialize};

use super::consumable::Consumable;
use crate::consts::INDICATOR_COUNT;

/// Indicator lamp identity, in snapshot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Indicator {
    PaperFilter = 0,
    Bin0 = 1,
    Bin1 = 2,
    Creamer = 3,
    Chocolate = 4,
    WaterPressure = 5,
    WaterTemp = 6,
    SystemFault = 7,
}

impl Indicator {
    /// All indicators in index order.
    pub const ALL: [Self; INDICATOR_COUNT] = [
        Self::PaperFilter,
        Self::Bin0,
        Self::Bin1,
        Self::Creamer,
        Self::Chocolate,
        Self::WaterPressure,
        Self::WaterTemp,
        Self::SystemFault,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Indicator showing the given consumable's level.
    pub const fn for_consumable(consumable: Consumable) -> Self {
        match consumable {
            Consumable::Bin0 => Self::Bin0,
            Consumable::Bin1 => Self::Bin1,
            Consumable::Creamer => Self::Creamer,
            Consumable::Chocolate => Self::Chocolate,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::PaperFilter => "paper_filter",
            Self::Bin0 => "bin0",
            Self::Bin1 => "bin1",
            Self::Creamer => "creamer",
            Self::Chocolate => "chocolate",
            Self::WaterPressure => "water_pressure",
            Self::WaterTemp => "water_temp",
            Self::SystemFault => "system_fault",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
