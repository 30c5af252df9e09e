//! Scripted raw-input scenarios for the simulation board.
//!
//! A scenario is a TOML file of timed input changes. Ticks are counted from
//! the first sample (tick 0).
//!
//! ```toml
//! initial = ["paper_filter"]
//!
//! [[step]]
//! at_tick = 100
//! channel = "bin0_empty"
//! value = true
//!
//! # Contact chatter: alternate for `toggles` ticks, then settle.
//! [[bounce]]
//! at_tick = 400
//! channel = "creamer_fill"
//! toggles = 7
//! settle = true
//! ```

use brewsense_common::board::BoardError;
use brewsense_common::io::{InputBits, InputChannel};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One scripted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Tick at which the new value is first sampled.
    pub at_tick: u64,
    pub channel: InputChannel,
    pub value: bool,
}

/// A chattering burst ending on `settle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounce {
    pub at_tick: u64,
    pub channel: InputChannel,
    /// Number of alternating samples before the final value.
    pub toggles: u32,
    #[serde(default = "default_settle")]
    pub settle: bool,
}

/// Longest accepted bounce burst, in ticks.
pub const MAX_BOUNCE_TOGGLES: u32 = 10_000;

fn default_settle() -> bool {
    true
}

/// Scenario file as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Channels asserted from tick 0.
    #[serde(default)]
    pub initial: Vec<InputChannel>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
    #[serde(default, rename = "bounce")]
    pub bounces: Vec<Bounce>,
}

/// Compiled scenario: initial word plus a tick-ordered change list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    initial: InputBits,
    events: Vec<Step>,
}

impl Scenario {
    /// A scenario with every input held low forever.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Parse and compile a scenario from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, BoardError> {
        let file: ScenarioFile =
            toml::from_str(text).map_err(|e| BoardError::ScenarioError(e.to_string()))?;
        Self::compile(&file)
    }

    /// Load a scenario file.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BoardError::ScenarioError(format!("cannot read {}: {e}", path.display()))
        })?;
        let scenario = Self::from_toml(&text)?;
        debug!(
            "scenario {} loaded: {} events",
            path.display(),
            scenario.events.len()
        );
        Ok(scenario)
    }

    /// Validate and expand bounces into plain steps.
    ///
    /// Steps must be listed in non-decreasing tick order. When several
    /// changes land on the same tick for the same channel, the bounce
    /// expansion is applied after the plain steps.
    pub fn compile(file: &ScenarioFile) -> Result<Self, BoardError> {
        if let Some(w) = file.steps.windows(2).find(|w| w[1].at_tick < w[0].at_tick) {
            return Err(BoardError::ScenarioError(format!(
                "steps out of order: tick {} listed after tick {}",
                w[1].at_tick, w[0].at_tick
            )));
        }

        let mut events = file.steps.clone();
        for b in &file.bounces {
            if b.toggles == 0 || b.toggles > MAX_BOUNCE_TOGGLES {
                return Err(BoardError::ScenarioError(format!(
                    "bounce on {} at tick {}: toggles must be 1..={MAX_BOUNCE_TOGGLES}, got {}",
                    b.channel, b.at_tick, b.toggles
                )));
            }
            let settle_tick = b.at_tick.checked_add(u64::from(b.toggles)).ok_or_else(|| {
                BoardError::ScenarioError(format!(
                    "bounce on {} at tick {} runs past the last tick",
                    b.channel, b.at_tick
                ))
            })?;
            // settle_tick fits, so every tick before it does too.
            events.extend((b.at_tick..settle_tick).map(|tick| Step {
                at_tick: tick,
                channel: b.channel,
                value: if (tick - b.at_tick) % 2 == 0 { b.settle } else { !b.settle },
            }));
            events.push(Step {
                at_tick: settle_tick,
                channel: b.channel,
                value: b.settle,
            });
        }
        // Stable: equal ticks keep file order, steps before bounces.
        events.sort_by_key(|e| e.at_tick);

        let initial = file
            .initial
            .iter()
            .fold(InputBits::empty(), |acc, c| acc.with(*c, true));

        Ok(Self { initial, events })
    }

    /// Raw word sampled before the first change.
    pub fn initial(&self) -> InputBits {
        self.initial
    }

    /// Changes in tick order, bounces expanded.
    pub fn events(&self) -> &[Step] {
        &self.events
    }

    /// Tick of the last scripted change, if any.
    pub fn last_tick(&self) -> Option<u64> {
        self.events.last().map(|e| e.at_tick)
    }
}

/// Replays a scenario one sample per tick.
#[derive(Debug, Clone)]
pub struct ScenarioPlayer {
    scenario: Scenario,
    cursor: usize,
    tick: u64,
    current: InputBits,
}

impl ScenarioPlayer {
    pub fn new(scenario: Scenario) -> Self {
        let current = scenario.initial;
        Self {
            scenario,
            cursor: 0,
            tick: 0,
            current,
        }
    }

    /// Raw word for the current tick, then advance.
    pub fn next_sample(&mut self) -> InputBits {
        while let Some(ev) = self.scenario.events.get(self.cursor) {
            if ev.at_tick > self.tick {
                break;
            }
            self.current = self.current.with(ev.channel, ev.value);
            self.cursor += 1;
        }
        self.tick += 1;
        self.current
    }

    /// Samples produced so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// True once every scripted change has been applied.
    pub fn finished(&self) -> bool {
        self.cursor >= self.scenario.events.len()
    }

    /// Start over from tick 0.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.tick = 0;
        self.current = self.scenario.initial;
    }
}
