//! Tracked consumables and their fill/empty trigger channels.

use core::fmt;
use serde::{Deserialize, Serialize};

use super::channel::InputChannel;
use crate::consts::CONSUMABLE_COUNT;

/// A tracked consumable supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Consumable {
    Bin0 = 0,
    Bin1 = 1,
    Creamer = 2,
    Chocolate = 3,
}

impl Consumable {
    /// All consumables in index order.
    pub const ALL: [Self; CONSUMABLE_COUNT] =
        [Self::Bin0, Self::Bin1, Self::Creamer, Self::Chocolate];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Channel whose rising edge refills this consumable.
    pub const fn fill_channel(self) -> InputChannel {
        match self {
            Self::Bin0 => InputChannel::Bin0Fill,
            Self::Bin1 => InputChannel::Bin1Fill,
            Self::Creamer => InputChannel::CreamerFill,
            Self::Chocolate => InputChannel::ChocolateFill,
        }
    }

    /// Channel whose rising edge marks this consumable empty.
    pub const fn empty_channel(self) -> InputChannel {
        match self {
            Self::Bin0 => InputChannel::Bin0Empty,
            Self::Bin1 => InputChannel::Bin1Empty,
            Self::Creamer => InputChannel::CreamerEmpty,
            Self::Chocolate => InputChannel::ChocolateEmpty,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bin0 => "bin0",
            Self::Bin1 => "bin1",
            Self::Creamer => "creamer",
            Self::Chocolate => "chocolate",
        }
    }
}

impl fmt::Display for Consumable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_channels_are_distinct() {
        let mut seen = Vec::new();
        for c in Consumable::ALL {
            seen.push(c.fill_channel());
            seen.push(c.empty_channel());
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), CONSUMABLE_COUNT * 2);
        assert!(!seen.contains(&InputChannel::PaperFilter));
        assert!(!seen.contains(&InputChannel::Error));
    }

    #[test]
    fn trigger_names_share_prefix() {
        for c in Consumable::ALL {
            assert!(c.fill_channel().name().starts_with(c.name()));
            assert!(c.empty_channel().name().starts_with(c.name()));
        }
    }
}
