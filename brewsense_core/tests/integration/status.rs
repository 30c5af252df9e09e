//! Status flags and their binary indicators.

use brewsense_common::io::{Indicator, InputBits};
use brewsense_common::status::IndicatorState;

use super::{debounce_cycles, production, run};

#[test]
fn pressure_override_clears_pressure_ok() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::PRESSURE_OVERRIDE, d);
    let snap = fe.snapshot();
    assert!(!snap.water_pressure_ok);
    assert!(snap.water_temp_ready);
    assert!(!snap.system_fault);

    fe.tick(InputBits::PRESSURE_OVERRIDE);
    let frame = fe.indicators().frame;
    assert_eq!(frame[Indicator::WaterPressure], IndicatorState::Solid);
    assert_eq!(frame[Indicator::WaterTemp], IndicatorState::Off);
}

#[test]
fn error_raises_fault_and_clears_after_release() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::ERROR, d + 1);
    assert!(fe.snapshot().system_fault);
    assert_eq!(
        fe.indicators().frame[Indicator::SystemFault],
        IndicatorState::Solid
    );

    run(&mut fe, InputBits::empty(), d + 1);
    assert!(!fe.snapshot().system_fault);
    assert_eq!(
        fe.indicators().frame[Indicator::SystemFault],
        IndicatorState::Off
    );
}

#[test]
fn status_indicators_ignore_blink_phase() {
    let d = debounce_cycles();
    let mut fe = production();
    let raw = InputBits::TEMP_OVERRIDE | InputBits::PAPER_FILTER;
    run(&mut fe, raw, d + 1);
    for _ in 0..2000 {
        fe.tick(raw);
        let lamps = fe.indicators().lamps();
        assert!(lamps[Indicator::WaterTemp.index()]);
        assert!(lamps[Indicator::PaperFilter.index()]);
        assert!(!lamps[Indicator::WaterPressure.index()]);
    }
}
