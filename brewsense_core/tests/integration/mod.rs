mod blink_timing;
mod bounce;
mod consumables;
mod reset;
mod status;

use brewsense_common::config::Timing;
use brewsense_common::io::InputBits;
use brewsense_core::FrontEnd;

/// Production timing: 1 ms tick, 20 debounce ticks, 500 blink ticks.
pub fn production() -> FrontEnd {
    FrontEnd::new(Timing::default())
}

pub fn debounce_cycles() -> u32 {
    Timing::default().debounce_cycles
}

pub fn run(fe: &mut FrontEnd, raw: InputBits, ticks: u32) {
    for _ in 0..ticks {
        fe.tick(raw);
    }
}
