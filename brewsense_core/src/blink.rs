//! Shared blink generator.
//!
//! Free-running counter that toggles a boolean phase every half-period,
//! giving a 50% duty-cycle square wave. One instance is owned by the
//! front-end and read by every blinking indicator.

/// Square-wave blink source.
#[derive(Debug, Clone)]
pub struct BlinkGenerator {
    counter: u32,
    current: bool,
    half_period: u32,
}

impl BlinkGenerator {
    /// Create a generator toggling every `half_period` ticks (minimum 1).
    pub fn new(half_period: u32) -> Self {
        Self {
            counter: 0,
            current: false,
            half_period: half_period.max(1),
        }
    }

    /// Advance one tick.
    #[inline]
    pub fn tick(&mut self) {
        if self.counter >= self.half_period - 1 {
            self.counter = 0;
            self.current = !self.current;
        } else {
            self.counter += 1;
        }
    }

    /// Current blink phase.
    #[inline]
    pub fn current(&self) -> bool {
        self.current
    }

    #[inline]
    pub fn half_period(&self) -> u32 {
        self.half_period
    }

    /// Counter and phase back to 0 / false.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.current = false;
    }
}
