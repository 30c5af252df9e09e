//! Monitored input channels and the raw input word.

use bitflags::bitflags;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::consts::CHANNEL_COUNT;

// ─── InputChannel ───────────────────────────────────────────────────

/// One monitored boolean input, in fixed sampling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum InputChannel {
    PaperFilter = 0,
    Bin0Fill = 1,
    Bin0Empty = 2,
    Bin1Fill = 3,
    Bin1Empty = 4,
    CreamerFill = 5,
    CreamerEmpty = 6,
    ChocolateFill = 7,
    ChocolateEmpty = 8,
    PressureOverride = 9,
    TempOverride = 10,
    Error = 11,
}

impl InputChannel {
    /// All channels in index order.
    pub const ALL: [Self; CHANNEL_COUNT] = [
        Self::PaperFilter,
        Self::Bin0Fill,
        Self::Bin0Empty,
        Self::Bin1Fill,
        Self::Bin1Empty,
        Self::CreamerFill,
        Self::CreamerEmpty,
        Self::ChocolateFill,
        Self::ChocolateEmpty,
        Self::PressureOverride,
        Self::TempOverride,
        Self::Error,
    ];

    /// Position in per-channel arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name, as used in scenario files and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PaperFilter => "paper_filter",
            Self::Bin0Fill => "bin0_fill",
            Self::Bin0Empty => "bin0_empty",
            Self::Bin1Fill => "bin1_fill",
            Self::Bin1Empty => "bin1_empty",
            Self::CreamerFill => "creamer_fill",
            Self::CreamerEmpty => "creamer_empty",
            Self::ChocolateFill => "chocolate_fill",
            Self::ChocolateEmpty => "chocolate_empty",
            Self::PressureOverride => "pressure_override",
            Self::TempOverride => "temp_override",
            Self::Error => "error",
        }
    }

    /// Bit of this channel in [`InputBits`].
    #[inline]
    pub const fn bit(self) -> InputBits {
        InputBits::from_bits_truncate(1 << self as u16)
    }
}

impl fmt::Display for InputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputChannel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown input channel: {s:?}"))
    }
}

// ─── InputBits ──────────────────────────────────────────────────────

bitflags! {
    /// Raw input sample, one bit per [`InputChannel`] (bit = channel index).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputBits: u16 {
        const PAPER_FILTER      = 1 << 0;
        const BIN0_FILL         = 1 << 1;
        const BIN0_EMPTY        = 1 << 2;
        const BIN1_FILL         = 1 << 3;
        const BIN1_EMPTY        = 1 << 4;
        const CREAMER_FILL      = 1 << 5;
        const CREAMER_EMPTY     = 1 << 6;
        const CHOCOLATE_FILL    = 1 << 7;
        const CHOCOLATE_EMPTY   = 1 << 8;
        const PRESSURE_OVERRIDE = 1 << 9;
        const TEMP_OVERRIDE     = 1 << 10;
        const ERROR             = 1 << 11;
    }
}

impl InputBits {
    /// Raw value of one channel.
    #[inline]
    pub const fn get(self, channel: InputChannel) -> bool {
        self.contains(channel.bit())
    }

    /// Copy with one channel set or cleared.
    #[inline]
    #[must_use]
    pub fn with(mut self, channel: InputChannel, value: bool) -> Self {
        self.set(channel.bit(), value);
        self
    }
}
