//! # Brewsense HAL Library
//!
//! Board drivers for the brewsense sensor front-end and the wiring that
//! builds a [`brewsense_core::CycleRunner`] from configuration.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Board driver implementations
//! - [`runtime`] - Config → registry → runner wiring
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    brewsense_hal binary                      │
//! │  ┌──────────────┐   ┌────────────────┐   ┌────────────────┐  │
//! │  │ FrontEndConfig│──►│ DriverRegistry │──►│ dyn BoardIo    │  │
//! │  └──────────────┘   └────────────────┘   └───────┬────────┘  │
//! │                                                  │           │
//! │                      ┌───────────────────────────▼────────┐  │
//! │                      │ CycleRunner (brewsense_core)       │  │
//! │                      │ sample → FrontEnd::tick → drive    │  │
//! │                      └────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod driver_registry;
pub mod drivers;
pub mod runtime;

pub use crate::driver_registry::DriverRegistry;
pub use crate::runtime::{RuntimeError, build_runner, resolve_board_config};
