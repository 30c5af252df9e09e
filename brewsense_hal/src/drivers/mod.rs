//! Board driver implementations.
//!
//! - [`simulation`] - Scenario-driven simulation board for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `BoardIo` trait from `brewsense_common::board`
//! 3. Register its factory in [`register_all_drivers`]

pub mod simulation;

use brewsense_common::board::BoardError;

use crate::driver_registry::DriverRegistry;

/// Register all built-in drivers.
pub fn register_all_drivers(registry: &mut DriverRegistry) -> Result<(), BoardError> {
    registry.register(simulation::DRIVER_NAME, simulation::create_driver)?;
    Ok(())
}
