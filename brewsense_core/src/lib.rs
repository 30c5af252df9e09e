//! # Brewsense Core
//!
//! Periodic input-sampling and status-output engine for a beverage
//! machine's sensor front-end. Twelve noisy binary inputs are debounced,
//! consumable levels and readiness/fault flags are derived from them, and
//! eight indicator lamps are rendered as off / solid / blinking.
//!
//! ## Tick Order
//!
//! 1. **Debounce** - 12 independent time-threshold filters
//! 2. **Level Tracker** - fill/empty rising edges override 4 levels
//! 3. **Status Deriver** - pressure / temperature / fault flags
//! 4. **Blink Generator** - shared square wave
//! 5. **Indicator Renderer** - registered, one tick behind the state
//!
//! ## No Error Path
//!
//! [`frontend::FrontEnd::tick`] cannot fail and does not allocate. Only the
//! [`cycle::CycleRunner`], which talks to a board, returns `Result`.

pub mod blink;
pub mod cycle;
pub mod debounce;
pub mod frontend;
pub mod indicator;
pub mod level;
pub mod status;

pub use cycle::{CycleError, CycleRunner, CycleStats, StopReason};
pub use frontend::FrontEnd;
