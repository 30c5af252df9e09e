//! Indicator rendering and the registered output stage.
//!
//! Consumable indicators use ordered guards: low → Solid, warning →
//! Blinking, otherwise Off. Binary status indicators are Solid while the
//! condition is bad and never blink.
//!
//! Outputs are registered: [`IndicatorRegister::latch`] stages the frame
//! rendered this tick and publishes the one staged on the previous tick, so
//! consumers observe every change one tick after the state that caused it.

use brewsense_common::consts::{FULL_BOUNDARY, INDICATOR_COUNT, LOW_THRESHOLD};
use brewsense_common::io::{Consumable, Indicator};
use brewsense_common::status::{IndicatorFrame, IndicatorState, Snapshot};

/// Render a consumable level.
#[inline]
pub const fn render_level(level: u8) -> IndicatorState {
    if level == 0 || level < LOW_THRESHOLD {
        IndicatorState::Solid
    } else if level < FULL_BOUNDARY {
        IndicatorState::Blinking
    } else {
        IndicatorState::Off
    }
}

/// Render a binary condition: Solid while `active`, Off otherwise.
#[inline]
pub const fn render_flag(active: bool) -> IndicatorState {
    if active {
        IndicatorState::Solid
    } else {
        IndicatorState::Off
    }
}

/// Render all eight indicators from the current snapshot.
pub fn render_frame(snapshot: &Snapshot) -> IndicatorFrame {
    let mut frame = IndicatorFrame::default();
    frame[Indicator::PaperFilter] = render_flag(snapshot.paper_filter_present);
    for consumable in Consumable::ALL {
        frame[Indicator::for_consumable(consumable)] = render_level(snapshot.level(consumable));
    }
    let flags = snapshot.flags();
    frame[Indicator::WaterPressure] = render_flag(!flags.water_pressure_ok);
    frame[Indicator::WaterTemp] = render_flag(!flags.water_temp_ready);
    frame[Indicator::SystemFault] = render_flag(flags.system_fault);
    frame
}

/// Indicator output as seen by a board: frame plus the blink phase it was
/// rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderedOutput {
    pub frame: IndicatorFrame,
    pub blink: bool,
}

impl RenderedOutput {
    /// Lamp drive levels.
    #[inline]
    pub fn lamps(&self) -> [bool; INDICATOR_COUNT] {
        self.frame.lamps(self.blink)
    }
}

/// One-tick output register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorRegister {
    staged: RenderedOutput,
    output: RenderedOutput,
}

impl IndicatorRegister {
    /// Register preloaded with the rendering of `initial`.
    pub fn new(initial: &Snapshot) -> Self {
        let rendered = RenderedOutput {
            frame: render_frame(initial),
            blink: false,
        };
        Self {
            staged: rendered,
            output: rendered,
        }
    }

    /// Clock the register: publish the previous render, stage a new one.
    #[inline]
    pub fn latch(&mut self, snapshot: &Snapshot, blink: bool) {
        self.output = self.staged;
        self.staged = RenderedOutput {
            frame: render_frame(snapshot),
            blink,
        };
    }

    /// Visible output.
    #[inline]
    pub fn output(&self) -> &RenderedOutput {
        &self.output
    }

    pub fn reset(&mut self, initial: &Snapshot) {
        *self = Self::new(initial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        let cases = [
            (0, IndicatorState::Solid),
            (1, IndicatorState::Solid),
            (49, IndicatorState::Solid),
            (50, IndicatorState::Blinking),
            (120, IndicatorState::Blinking),
            (199, IndicatorState::Blinking),
            (200, IndicatorState::Off),
            (255, IndicatorState::Off),
        ];
        for (level, expected) in cases {
            assert_eq!(render_level(level), expected, "level {level}");
        }
    }

    #[test]
    fn flags_never_blink() {
        assert_eq!(render_flag(true), IndicatorState::Solid);
        assert_eq!(render_flag(false), IndicatorState::Off);
    }

    #[test]
    fn default_snapshot_renders_all_off() {
        let frame = render_frame(&Snapshot::default());
        assert!(frame.iter().all(|(_, s)| s == IndicatorState::Off));
    }

    #[test]
    fn frame_maps_each_quantity() {
        let snap = Snapshot {
            paper_filter_present: true,
            bin0_level: 0,
            bin1_level: 150,
            creamer_level: 255,
            chocolate_level: 30,
            water_pressure_ok: false,
            water_temp_ready: true,
            system_fault: true,
        };
        let frame = render_frame(&snap);
        assert_eq!(frame[Indicator::PaperFilter], IndicatorState::Solid);
        assert_eq!(frame[Indicator::Bin0], IndicatorState::Solid);
        assert_eq!(frame[Indicator::Bin1], IndicatorState::Blinking);
        assert_eq!(frame[Indicator::Creamer], IndicatorState::Off);
        assert_eq!(frame[Indicator::Chocolate], IndicatorState::Solid);
        assert_eq!(frame[Indicator::WaterPressure], IndicatorState::Solid);
        assert_eq!(frame[Indicator::WaterTemp], IndicatorState::Off);
        assert_eq!(frame[Indicator::SystemFault], IndicatorState::Solid);
    }

    #[test]
    fn register_delays_by_one_latch() {
        let initial = Snapshot::default();
        let mut reg = IndicatorRegister::new(&initial);
        let faulted = Snapshot {
            system_fault: true,
            ..initial
        };

        reg.latch(&faulted, false);
        assert_eq!(reg.output().frame[Indicator::SystemFault], IndicatorState::Off);

        reg.latch(&faulted, false);
        assert_eq!(reg.output().frame[Indicator::SystemFault], IndicatorState::Solid);

        reg.latch(&initial, false);
        assert_eq!(reg.output().frame[Indicator::SystemFault], IndicatorState::Solid);
        reg.latch(&initial, false);
        assert_eq!(reg.output().frame[Indicator::SystemFault], IndicatorState::Off);
    }

    #[test]
    fn lamps_carry_blink_phase() {
        let initial = Snapshot::default();
        let warn = Snapshot {
            bin1_level: 100,
            ..initial
        };
        let mut reg = IndicatorRegister::new(&initial);
        reg.latch(&warn, true);
        reg.latch(&warn, false);
        assert!(reg.output().lamps()[Indicator::Bin1.index()]);
        reg.latch(&warn, false);
        assert!(!reg.output().lamps()[Indicator::Bin1.index()]);
    }
}
