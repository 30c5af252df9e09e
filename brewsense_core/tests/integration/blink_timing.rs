//! Blink period and its effect on warning indicators.

use brewsense_common::config::Timing;
use brewsense_common::io::{Consumable, Indicator, InputBits};

use super::{production, run};

#[test]
fn blink_period_is_two_half_periods() {
    let half = Timing::default().blink_half_period_cycles;
    let mut fe = production();
    let mut toggles = Vec::new();
    let mut prev = fe.blink();
    for tick in 1..=u64::from(half) * 4 {
        fe.tick(InputBits::empty());
        if fe.blink() != prev {
            toggles.push(tick);
            prev = fe.blink();
        }
    }
    let half = u64::from(half);
    assert_eq!(toggles, vec![half, 2 * half, 3 * half, 4 * half]);
}

#[test]
fn warning_lamp_follows_blink_one_tick_late() {
    let mut fe = production();
    fe.set_level(Consumable::Chocolate, 120);
    let mut prev_blink = fe.blink();
    for _ in 0..1500 {
        fe.tick(InputBits::empty());
        let lamp = fe.indicators().lamps()[Indicator::Chocolate.index()];
        assert_eq!(lamp, prev_blink);
        prev_blink = fe.blink();
    }
}

#[test]
fn steady_lamps_do_not_blink() {
    let mut fe = production();
    run(&mut fe, InputBits::empty(), 1200);
    assert!(fe.indicators().lamps().iter().all(|lit| !lit));
}
