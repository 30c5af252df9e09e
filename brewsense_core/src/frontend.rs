//! The per-tick front-end engine.
//!
//! `FrontEnd` owns every piece of mutable state in the subsystem and runs
//! the components in data-dependency order once per tick:
//!
//! ```text
//! raw ─► Debounce (12) ─► edges ─► Level Trackers (4) ─┐
//!                    └──► Status Deriver ──────────────┼─► Indicator Register
//!                         Blink Generator ─────────────┘
//! ```
//!
//! `tick` has no error path and performs no allocation. The consumable
//! manager may adjust levels between ticks through [`FrontEnd::set_level`]
//! and [`FrontEnd::deplete`]; the `&mut self` receiver is the exclusion.

use brewsense_common::config::Timing;
use brewsense_common::io::{Consumable, InputBits, InputChannel};
use brewsense_common::status::{Snapshot, StatusFlags};
use tracing::{debug, trace};

use crate::blink::BlinkGenerator;
use crate::debounce::{ChannelEdges, DebounceBank};
use crate::indicator::{IndicatorRegister, RenderedOutput};
use crate::level::{ConsumableLevels, LevelOverride};
use crate::status::derive_from;

/// Debounced input front-end with status rendering.
#[derive(Debug, Clone)]
pub struct FrontEnd {
    timing: Timing,
    channels: DebounceBank,
    levels: ConsumableLevels,
    status: StatusFlags,
    blink: BlinkGenerator,
    indicators: IndicatorRegister,
    tick_count: u64,
}

impl FrontEnd {
    /// Build the engine in its reset state.
    pub fn new(timing: Timing) -> Self {
        debug!(
            "FrontEnd created: tick={}µs, debounce={} ticks, blink half-period={} ticks",
            timing.tick_period_us, timing.debounce_cycles, timing.blink_half_period_cycles
        );
        Self {
            timing,
            channels: DebounceBank::new(timing.debounce_cycles),
            levels: ConsumableLevels::default(),
            status: StatusFlags::default(),
            blink: BlinkGenerator::new(timing.blink_half_period_cycles),
            indicators: IndicatorRegister::new(&Snapshot::default()),
            tick_count: 0,
        }
    }

    /// Run one tick against a raw input sample.
    pub fn tick(&mut self, raw: InputBits) {
        let edges = self.channels.update(raw);
        if !edges.is_empty() {
            self.log_edges(&edges);
            self.apply_level_edges(&edges);
        }

        let status = derive_from(self.channels.debounced());
        if status != self.status {
            debug!(
                pressure_ok = status.water_pressure_ok,
                temp_ready = status.water_temp_ready,
                fault = status.system_fault,
                "status flags changed"
            );
            self.status = status;
        }

        self.blink.tick();

        let snapshot = self.snapshot();
        self.indicators.latch(&snapshot, self.blink.current());

        self.tick_count += 1;
        trace!(tick = self.tick_count, raw = raw.bits(), "tick");
    }

    fn apply_level_edges(&mut self, edges: &ChannelEdges) {
        for consumable in Consumable::ALL {
            let fill = edges.rose(consumable.fill_channel());
            let empty = edges.rose(consumable.empty_channel());
            match self.levels.apply_edges(consumable, fill, empty) {
                Some(LevelOverride::Filled) => debug!(%consumable, "level set to full"),
                Some(LevelOverride::Emptied) => debug!(%consumable, "level set to empty"),
                None => {}
            }
        }
    }

    fn log_edges(&self, edges: &ChannelEdges) {
        for channel in InputChannel::ALL {
            if edges.rising.get(channel) {
                debug!(%channel, tick = self.tick_count, "debounced rising");
            } else if edges.falling.get(channel) {
                debug!(%channel, tick = self.tick_count, "debounced falling");
            }
        }
    }

    /// Restore the power-on state.
    pub fn reset(&mut self) {
        self.channels.reset();
        self.levels.reset();
        self.status = StatusFlags::default();
        self.blink.reset();
        self.indicators.reset(&Snapshot::default());
        self.tick_count = 0;
        debug!("FrontEnd reset");
    }

    // ─── Consumable-manager hook ────────────────────────────────────

    /// Overwrite a consumable level between ticks.
    pub fn set_level(&mut self, consumable: Consumable, value: u8) {
        self.levels.set(consumable, value);
    }

    /// Lower a consumable level between ticks, saturating at empty.
    pub fn deplete(&mut self, consumable: Consumable, amount: u8) -> u8 {
        self.levels.deplete(consumable, amount)
    }

    // ─── Read side ──────────────────────────────────────────────────

    /// Debounced and derived values.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paper_filter_present: self.channels.get(InputChannel::PaperFilter),
            bin0_level: self.levels.get(Consumable::Bin0),
            bin1_level: self.levels.get(Consumable::Bin1),
            creamer_level: self.levels.get(Consumable::Creamer),
            chocolate_level: self.levels.get(Consumable::Chocolate),
            water_pressure_ok: self.status.water_pressure_ok,
            water_temp_ready: self.status.water_temp_ready,
            system_fault: self.status.system_fault,
        }
    }

    /// Registered indicator output.
    #[inline]
    pub fn indicators(&self) -> &RenderedOutput {
        self.indicators.output()
    }

    /// Debounced value of one channel.
    #[inline]
    pub fn debounced(&self, channel: InputChannel) -> bool {
        self.channels.get(channel)
    }

    #[inline]
    pub fn level(&self, consumable: Consumable) -> u8 {
        self.levels.get(consumable)
    }

    #[inline]
    pub fn status(&self) -> StatusFlags {
        self.status
    }

    /// Current shared blink phase.
    #[inline]
    pub fn blink(&self) -> bool {
        self.blink.current()
    }

    /// Ticks since construction or the last reset.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use brewsense_common::io::Indicator;
    use brewsense_common::status::IndicatorState;

    const DEBOUNCE: u32 = 4;
    const HALF: u32 = 10;

    fn engine() -> FrontEnd {
        FrontEnd::new(Timing::with_cycles(DEBOUNCE, HALF))
    }

    fn run(fe: &mut FrontEnd, raw: InputBits, ticks: u32) {
        for _ in 0..ticks {
            fe.tick(raw);
        }
    }

    #[test]
    fn new_engine_matches_reset_snapshot() {
        let fe = engine();
        assert_eq!(fe.snapshot(), Snapshot::default());
        assert!(!fe.blink());
        assert_eq!(fe.tick_count(), 0);
        assert!(fe
            .indicators()
            .frame
            .iter()
            .all(|(_, s)| s == IndicatorState::Off));
    }

    #[test]
    fn empty_edge_drains_level_at_debounce_tick() {
        let mut fe = engine();
        run(&mut fe, InputBits::BIN1_EMPTY, DEBOUNCE - 1);
        assert_eq!(fe.level(Consumable::Bin1), 255);
        fe.tick(InputBits::BIN1_EMPTY);
        assert_eq!(fe.level(Consumable::Bin1), 0);
        // Indicator follows one tick later.
        assert_eq!(fe.indicators().frame[Indicator::Bin1], IndicatorState::Off);
        fe.tick(InputBits::BIN1_EMPTY);
        assert_eq!(fe.indicators().frame[Indicator::Bin1], IndicatorState::Solid);
    }

    #[test]
    fn held_fill_does_not_clobber_depletion() {
        let mut fe = engine();
        fe.set_level(Consumable::Creamer, 10);
        run(&mut fe, InputBits::CREAMER_FILL, DEBOUNCE);
        assert_eq!(fe.level(Consumable::Creamer), 255);

        assert_eq!(fe.deplete(Consumable::Creamer, 100), 155);
        run(&mut fe, InputBits::CREAMER_FILL, 50);
        assert_eq!(fe.level(Consumable::Creamer), 155);
    }

    #[test]
    fn simultaneous_fill_and_empty_fills() {
        let mut fe = engine();
        fe.set_level(Consumable::Chocolate, 77);
        run(
            &mut fe,
            InputBits::CHOCOLATE_FILL | InputBits::CHOCOLATE_EMPTY,
            DEBOUNCE,
        );
        assert_eq!(fe.level(Consumable::Chocolate), 255);
    }

    #[test]
    fn status_follows_debounced_overrides() {
        let mut fe = engine();
        let raw = InputBits::PRESSURE_OVERRIDE | InputBits::ERROR;
        run(&mut fe, raw, DEBOUNCE - 1);
        assert!(fe.status().water_pressure_ok);
        fe.tick(raw);
        assert!(!fe.status().water_pressure_ok);
        assert!(fe.status().water_temp_ready);
        assert!(fe.status().system_fault);
        assert!(fe.snapshot().system_fault);
    }

    #[test]
    fn blink_is_independent_of_inputs() {
        let mut a = engine();
        let mut b = engine();
        for tick in 0..(HALF * 5) {
            a.tick(InputBits::empty());
            let noisy = if tick % 3 == 0 { InputBits::all() } else { InputBits::ERROR };
            b.tick(noisy);
            assert_eq!(a.blink(), b.blink());
        }
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut fe = engine();
        run(&mut fe, InputBits::all(), DEBOUNCE * 3);
        fe.deplete(Consumable::Bin0, 90);
        fe.reset();
        assert_eq!(fe.snapshot(), Snapshot::default());
        assert_eq!(fe.status(), StatusFlags::default());
        assert!(!fe.blink());
        assert_eq!(fe.tick_count(), 0);
        for c in InputChannel::ALL {
            assert!(!fe.debounced(c));
        }
        assert_eq!(*fe.indicators(), RenderedOutput {
            frame: Default::default(),
            blink: false,
        });
    }
}
