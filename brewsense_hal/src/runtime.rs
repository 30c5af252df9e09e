//! Wiring between configuration, driver registry and the tick runner.

use brewsense_common::board::BoardError;
use brewsense_common::config::{BoardConfig, ConfigError, FrontEndConfig};
use brewsense_core::{CycleError, CycleRunner};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::driver_registry::DriverRegistry;

/// Anything that can stop the binary.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Cycle(#[from] CycleError),
}

/// Board section with the scenario override applied and relative paths
/// resolved against the directory of the config file.
pub fn resolve_board_config(
    config: &FrontEndConfig,
    config_path: &Path,
    scenario_override: Option<PathBuf>,
) -> BoardConfig {
    let mut board = config.board.clone();
    if let Some(path) = scenario_override {
        // CLI paths are relative to the working directory; keep as given.
        board.scenario = Some(path);
    } else if let Some(path) = board.scenario.take() {
        let resolved = match config_path.parent() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        };
        board.scenario = Some(resolved);
    }
    board
}

/// Build a runner for the configured board.
pub fn build_runner(
    config: &FrontEndConfig,
    board: &BoardConfig,
    registry: &DriverRegistry,
) -> Result<CycleRunner, RuntimeError> {
    let timing = config.timing.derive()?;
    let driver = registry.create_driver(board)?;
    info!(
        "runner built: driver={}, tick={}µs, debounce={} ticks, blink half-period={} ticks",
        driver.name(),
        timing.tick_period_us,
        timing.debounce_cycles,
        timing.blink_half_period_cycles
    );
    Ok(CycleRunner::new(timing, driver, board.publish_interval))
}
