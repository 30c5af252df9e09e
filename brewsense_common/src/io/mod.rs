//! I/O identities shared between the tick engine and board drivers.
//!
//! Channels, consumables and indicators are addressed by typed enums in a
//! fixed order; boards deliver the raw sample as one [`InputBits`] word.

pub mod channel;
pub mod consumable;
pub mod indicator;

pub use channel::{InputBits, InputChannel};
pub use consumable::Consumable;
pub use indicator::Indicator;
