//! Reset restores the documented initial snapshot from any state.

use brewsense_common::io::{Consumable, InputBits, InputChannel};
use brewsense_common::status::{IndicatorFrame, Snapshot, StatusFlags};

use super::{debounce_cycles, production, run};

#[test]
fn reset_from_busy_state() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::all(), d * 2);
    run(&mut fe, InputBits::BIN0_EMPTY | InputBits::ERROR, d * 2);
    fe.deplete(Consumable::Creamer, 200);
    // Leave a debounce half-way through.
    run(&mut fe, InputBits::PAPER_FILTER, d / 2);

    fe.reset();

    assert_eq!(fe.snapshot(), Snapshot::default());
    assert_eq!(fe.status(), StatusFlags::default());
    assert!(!fe.blink());
    assert_eq!(fe.tick_count(), 0);
    assert_eq!(fe.indicators().frame, IndicatorFrame::default());
    for c in InputChannel::ALL {
        assert!(!fe.debounced(c));
    }
}

#[test]
fn reset_clears_pending_debounce() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::PAPER_FILTER, d - 1);
    fe.reset();
    // A fresh full interval is needed after reset.
    run(&mut fe, InputBits::PAPER_FILTER, d - 1);
    assert!(!fe.snapshot().paper_filter_present);
    fe.tick(InputBits::PAPER_FILTER);
    assert!(fe.snapshot().paper_filter_present);
}

#[test]
fn behaviour_after_reset_matches_fresh_engine() {
    let d = debounce_cycles();
    let mut used = production();
    run(&mut used, InputBits::all(), d * 3);
    used.reset();
    let mut fresh = production();

    let script = [
        (InputBits::BIN1_EMPTY, d + 3),
        (InputBits::TEMP_OVERRIDE, d),
        (InputBits::empty(), 700),
    ];
    for (raw, ticks) in script {
        for _ in 0..ticks {
            used.tick(raw);
            fresh.tick(raw);
            assert_eq!(used.snapshot(), fresh.snapshot());
            assert_eq!(used.indicators(), fresh.indicators());
            assert_eq!(used.blink(), fresh.blink());
        }
    }
}
