//! Bounce rejection and exact commit timing on every channel.

use brewsense_common::io::{InputBits, InputChannel};

use super::{debounce_cycles, production, run};

#[test]
fn short_pulses_never_commit() {
    let d = debounce_cycles();
    for channel in InputChannel::ALL {
        let mut fe = production();
        let high = InputBits::empty().with(channel, true);
        // Pulses of every length shorter than the interval, separated by a
        // single tick back at the old value.
        for len in 1..d {
            run(&mut fe, high, len);
            fe.tick(InputBits::empty());
            assert!(!fe.debounced(channel), "{channel} committed after {len}-tick pulse");
        }
    }
}

#[test]
fn commit_happens_at_exact_tick() {
    let d = debounce_cycles();
    for channel in InputChannel::ALL {
        let mut fe = production();
        let high = InputBits::empty().with(channel, true);
        for tick in 1..d {
            fe.tick(high);
            assert!(!fe.debounced(channel), "{channel} early at tick {tick}");
        }
        fe.tick(high);
        assert!(fe.debounced(channel), "{channel} not committed at tick {d}");
    }
}

#[test]
fn release_is_debounced_too() {
    let d = debounce_cycles();
    let mut fe = production();
    run(&mut fe, InputBits::PAPER_FILTER, d);
    assert!(fe.snapshot().paper_filter_present);

    // Chatter on release: drops of d-1 ticks interleaved with single highs.
    for _ in 0..5 {
        run(&mut fe, InputBits::empty(), d - 1);
        fe.tick(InputBits::PAPER_FILTER);
        assert!(fe.snapshot().paper_filter_present);
    }
    run(&mut fe, InputBits::empty(), d);
    assert!(!fe.snapshot().paper_filter_present);
}

#[test]
fn bouncing_channel_does_not_disturb_neighbours() {
    let d = debounce_cycles();
    let mut fe = production();
    for tick in 0..(d * 4) {
        let mut raw = InputBits::BIN1_FILL;
        if tick % 2 == 0 {
            raw |= InputBits::BIN1_EMPTY;
        }
        fe.tick(raw);
    }
    assert!(fe.debounced(InputChannel::Bin1Fill));
    assert!(!fe.debounced(InputChannel::Bin1Empty));
    assert_eq!(fe.snapshot().bin1_level, 255);
}
