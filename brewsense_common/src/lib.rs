//! Brewsense Common Library
//!
//! Shared constants, configuration loading and I/O identity types for the
//! brewsense sensor front-end workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Fixed thresholds and timing constants
//! - [`config`] - Configuration loading traits, timing derivation
//! - [`io`] - Input channels, consumables, indicators, raw input word
//! - [`status`] - Status flags, indicator states, the readable snapshot
//! - [`board`] - Board I/O driver trait and error types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use brewsense_common::prelude::*;
//!
//! let raw = InputBits::empty().with(InputChannel::Bin0Empty, true);
//! assert!(raw.get(InputChannel::Bin0Empty));
//! ```

pub mod board;
pub mod config;
pub mod consts;
pub mod io;
pub mod prelude;
pub mod status;
