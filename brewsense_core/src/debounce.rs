//! Time-threshold debounce filter.
//!
//! A channel commits a new value only after the raw input has differed from
//! the debounced value for `threshold` consecutive ticks. Any tick where the
//! raw input agrees with the debounced value restarts the interval. The rule
//! is symmetric for rising and falling transitions; there is no hysteresis
//! beyond the interval itself.

use brewsense_common::consts::CHANNEL_COUNT;
use brewsense_common::io::{InputBits, InputChannel};

/// Per-channel debounce state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelState {
    /// Last sampled raw value.
    pub raw_value: bool,
    /// Committed (debounced) value.
    pub debounced_value: bool,
    /// Consecutive ticks the raw value has differed from `debounced_value`.
    /// Always `< threshold` between updates.
    pub stable_counter: u32,
}

impl ChannelState {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Advance one channel by one tick. Returns the (possibly new) debounced
/// value.
///
/// `threshold` is the debounce interval in ticks; values below 1 behave as 1.
#[inline]
pub fn debounce_update(raw: bool, state: &mut ChannelState, threshold: u32) -> bool {
    state.raw_value = raw;
    if raw == state.debounced_value {
        state.stable_counter = 0;
    } else {
        state.stable_counter += 1;
        if state.stable_counter >= threshold {
            state.debounced_value = raw;
            state.stable_counter = 0;
        }
    }
    state.debounced_value
}

// ─── Channel Bank ───────────────────────────────────────────────────

/// Debounced transitions committed during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelEdges {
    /// Channels that went false → true.
    pub rising: InputBits,
    /// Channels that went true → false.
    pub falling: InputBits,
}

impl ChannelEdges {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rising.is_empty() && self.falling.is_empty()
    }

    #[inline]
    pub fn rose(&self, channel: InputChannel) -> bool {
        self.rising.get(channel)
    }
}

/// The twelve independent debounce channels.
#[derive(Debug, Clone)]
pub struct DebounceBank {
    channels: [ChannelState; CHANNEL_COUNT],
    threshold: u32,
}

impl DebounceBank {
    pub fn new(threshold: u32) -> Self {
        Self {
            channels: [ChannelState::default(); CHANNEL_COUNT],
            threshold: threshold.max(1),
        }
    }

    /// Debounce one raw sample across all channels.
    pub fn update(&mut self, raw: InputBits) -> ChannelEdges {
        let mut edges = ChannelEdges::default();
        for channel in InputChannel::ALL {
            let state = &mut self.channels[channel.index()];
            let before = state.debounced_value;
            let after = debounce_update(raw.get(channel), state, self.threshold);
            if after != before {
                if after {
                    edges.rising |= channel.bit();
                } else {
                    edges.falling |= channel.bit();
                }
            }
        }
        edges
    }

    /// Current debounced value of one channel.
    #[inline]
    pub fn get(&self, channel: InputChannel) -> bool {
        self.channels[channel.index()].debounced_value
    }

    /// Full channel state, for diagnostics.
    #[inline]
    pub fn state(&self, channel: InputChannel) -> &ChannelState {
        &self.channels[channel.index()]
    }

    /// All debounced values as one word.
    pub fn debounced(&self) -> InputBits {
        InputChannel::ALL
            .into_iter()
            .filter(|c| self.get(*c))
            .fold(InputBits::empty(), |acc, c| acc | c.bit())
    }

    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Every channel back to debounced=false, counter=0.
    pub fn reset(&mut self) {
        self.channels.iter_mut().for_each(ChannelState::reset);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
