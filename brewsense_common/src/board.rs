//! Board I/O driver trait and error types.
//!
//! This module defines:
//! - `BoardIo` trait - Interface for pluggable sensor/indicator boards
//! - `BoardError` enum - Error types for board operations
//! - `BoardFactory` type alias - Factory function type

use thiserror::Error;

use crate::config::BoardConfig;
use crate::io::InputBits;
use crate::status::{IndicatorFrame, Snapshot};

/// Error types for board operations.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    Communication(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Scenario script could not be loaded or is inconsistent
    #[error("Scenario error: {0}")]
    ScenarioError(String),
}

/// Factory function type for creating board instances from the `[board]`
/// config section.
pub type BoardFactory = fn(&BoardConfig) -> Result<Box<dyn BoardIo>, BoardError>;

/// Trait defining the interface for board I/O drivers.
///
/// The tick runner manages boards through this trait, enabling physical
/// and simulated sensor front-ends behind the same loop.
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the tick loop starts
/// 2. `sample()` then `drive()` - Called every tick
/// 3. `publish()` - Called every `publish_interval` ticks
/// 4. `shutdown()` - Called once when the loop stops
///
/// # Timing Contracts
///
/// | Operation | RT Constraint |
/// |-----------|---------------|
/// | `init()` | None (pre-loop) |
/// | `sample()` + `drive()` | **HARD**, within one tick |
/// | `publish()` | Soft |
/// | `shutdown()` | None (post-loop) |
pub trait BoardIo: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Prepare the hardware (or simulation state).
    ///
    /// # Errors
    /// Return `BoardError::InitFailed` if initialization cannot complete.
    fn init(&mut self) -> Result<(), BoardError>;

    /// Sample all twelve raw inputs for the current tick.
    fn sample(&mut self) -> Result<InputBits, BoardError>;

    /// Drive the indicator lamps.
    ///
    /// `blink` is the shared blink phase; a board that only has on/off lamps
    /// writes `frame.lamps(blink)`.
    fn drive(&mut self, frame: &IndicatorFrame, blink: bool) -> Result<(), BoardError>;

    /// Expose the debounced/derived snapshot to the process controller.
    ///
    /// Default implementation does nothing.
    fn publish(&mut self, _snapshot: &Snapshot) -> Result<(), BoardError> {
        Ok(())
    }

    /// Release hardware resources.
    fn shutdown(&mut self) -> Result<(), BoardError>;
}
