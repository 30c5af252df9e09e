//! Simulation board driver.
//!
//! Replays a [`Scenario`] as the raw input source and keeps the lamp drive
//! levels in memory instead of writing GPIOs. Lamp and snapshot changes are
//! logged, which makes the driver usable both for bench runs of the binary
//! and for tests.

pub mod scenario;

use brewsense_common::board::{BoardError, BoardIo};
use brewsense_common::config::BoardConfig;
use brewsense_common::consts::INDICATOR_COUNT;
use brewsense_common::io::{Indicator, InputBits};
use brewsense_common::status::{IndicatorFrame, Snapshot};
use tracing::{debug, info};

pub use scenario::{Scenario, ScenarioPlayer};

/// Driver name in the registry.
pub const DRIVER_NAME: &str = "simulation";

/// Factory registered under [`DRIVER_NAME`].
pub fn create_driver(config: &BoardConfig) -> Result<Box<dyn BoardIo>, BoardError> {
    let scenario = match &config.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::idle(),
    };
    Ok(Box::new(SimulationBoard::new(scenario)))
}

/// Software stand-in for the sensor/indicator board.
#[derive(Debug)]
pub struct SimulationBoard {
    player: ScenarioPlayer,
    frame: IndicatorFrame,
    lamps: [bool; INDICATOR_COUNT],
    lamp_transitions: [u64; INDICATOR_COUNT],
    last_snapshot: Option<Snapshot>,
    initialized: bool,
}

impl SimulationBoard {
    /// Board replaying `scenario`; lamps start dark.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            player: ScenarioPlayer::new(scenario),
            frame: IndicatorFrame::default(),
            lamps: [false; INDICATOR_COUNT],
            lamp_transitions: [0; INDICATOR_COUNT],
            last_snapshot: None,
            initialized: false,
        }
    }

    /// Lamp drive levels last written.
    pub fn lamps(&self) -> &[bool; INDICATOR_COUNT] {
        &self.lamps
    }

    /// Indicator states last written.
    pub fn frame(&self) -> &IndicatorFrame {
        &self.frame
    }

    /// Number of on/off transitions of one lamp.
    pub fn lamp_transitions(&self, indicator: Indicator) -> u64 {
        self.lamp_transitions[indicator.index()]
    }

    /// Snapshot last published.
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Samples delivered so far.
    pub fn ticks(&self) -> u64 {
        self.player.ticks()
    }

    /// True once every scripted change has been sampled.
    pub fn scenario_finished(&self) -> bool {
        self.player.finished()
    }
}

impl BoardIo for SimulationBoard {
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn init(&mut self) -> Result<(), BoardError> {
        if self.initialized {
            return Err(BoardError::InitFailed(
                "simulation board already initialized".to_string(),
            ));
        }
        self.player.rewind();
        self.initialized = true;
        info!("simulation board initialized");
        Ok(())
    }

    fn sample(&mut self) -> Result<InputBits, BoardError> {
        Ok(self.player.next_sample())
    }

    fn drive(&mut self, frame: &IndicatorFrame, blink: bool) -> Result<(), BoardError> {
        if *frame != self.frame {
            for (indicator, state) in frame.iter() {
                if state != self.frame[indicator] {
                    debug!(%indicator, ?state, tick = self.player.ticks(), "indicator changed");
                }
            }
            self.frame = *frame;
        }

        let lamps = frame.lamps(blink);
        for (i, (&new, old)) in lamps.iter().zip(self.lamps.iter_mut()).enumerate() {
            if new != *old {
                *old = new;
                self.lamp_transitions[i] += 1;
            }
        }
        Ok(())
    }

    fn publish(&mut self, snapshot: &Snapshot) -> Result<(), BoardError> {
        if self.last_snapshot.as_ref() != Some(snapshot) {
            debug!(?snapshot, "snapshot changed");
        }
        self.last_snapshot = Some(*snapshot);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), BoardError> {
        self.initialized = false;
        info!(
            "simulation board shut down after {} ticks (scenario finished: {})",
            self.player.ticks(),
            self.player.finished()
        );
        Ok(())
    }
}
