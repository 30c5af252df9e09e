//! Level overrides and their indicators, end to end.

use brewsense_common::io::{Consumable, Indicator, InputBits};
use brewsense_common::status::IndicatorState;

use super::{debounce_cycles, production, run};

#[test]
fn bin0_empty_scenario() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::BIN0_EMPTY, d + 1);

    assert_eq!(fe.snapshot().bin0_level, 0);
    assert_eq!(fe.indicators().frame[Indicator::Bin0], IndicatorState::Solid);

    // And it stays that way.
    run(&mut fe, InputBits::BIN0_EMPTY, 1000);
    assert_eq!(fe.snapshot().bin0_level, 0);
    assert_eq!(fe.indicators().frame[Indicator::Bin0], IndicatorState::Solid);
    assert!(fe.indicators().lamps()[Indicator::Bin0.index()]);
}

#[test]
fn refill_after_empty() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::CREAMER_EMPTY, d);
    assert_eq!(fe.level(Consumable::Creamer), 0);

    run(&mut fe, InputBits::empty(), d);
    run(&mut fe, InputBits::CREAMER_FILL, d);
    assert_eq!(fe.level(Consumable::Creamer), 255);
    fe.tick(InputBits::CREAMER_FILL);
    assert_eq!(fe.indicators().frame[Indicator::Creamer], IndicatorState::Off);
}

#[test]
fn fill_wins_when_both_triggers_commit_together() {
    let d = debounce_cycles();
    let mut fe = production();
    fe.set_level(Consumable::Bin1, 80);
    run(&mut fe, InputBits::BIN1_FILL | InputBits::BIN1_EMPTY, d);
    assert_eq!(fe.level(Consumable::Bin1), 255);
}

#[test]
fn empty_edge_while_fill_held_still_empties() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::CHOCOLATE_FILL, d);
    // Fill is held (no new edge), empty now commits.
    run(&mut fe, InputBits::CHOCOLATE_FILL | InputBits::CHOCOLATE_EMPTY, d);
    assert_eq!(fe.level(Consumable::Chocolate), 0);
}

#[test]
fn depletion_walks_through_indicator_bands() {
    let mut fe = production();
    let expectations = [
        (255, IndicatorState::Off),
        (200, IndicatorState::Off),
        (199, IndicatorState::Blinking),
        (50, IndicatorState::Blinking),
        (49, IndicatorState::Solid),
        (0, IndicatorState::Solid),
    ];
    for (level, expected) in expectations {
        fe.set_level(Consumable::Bin1, level);
        run(&mut fe, InputBits::empty(), 2);
        assert_eq!(fe.level(Consumable::Bin1), level);
        assert_eq!(
            fe.indicators().frame[Indicator::Bin1],
            expected,
            "level {level}"
        );
    }
}

#[test]
fn other_consumables_untouched() {
    let d = debounce_cycles();
    let mut fe = production();
    fe.deplete(Consumable::Bin1, 100);
    run(&mut fe, InputBits::BIN0_EMPTY, d);
    let snap = fe.snapshot();
    assert_eq!(snap.bin0_level, 0);
    assert_eq!(snap.bin1_level, 155);
    assert_eq!(snap.creamer_level, 255);
    assert_eq!(snap.chocolate_level, 255);
}
