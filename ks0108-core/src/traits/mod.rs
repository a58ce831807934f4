//! Hardware abstraction traits
//!
//! These traits define the interface between the rendering engine
//! and hardware-specific bus implementations.

pub mod bus;

pub use bus::{cmd, DisplayBus, Status, STATUS_BUSY, STATUS_NOT_READY, STATUS_OFF, STATUS_RESET};
