//! KS0108 Hardware Abstraction Layer
//!
//! This crate defines the board-facing traits the parallel bus driver needs
//! beyond what `embedded-hal` offers. `embedded-hal` 1.0 has no notion of a
//! pin that changes direction at runtime, yet the KS0108 data bus is read
//! (status, display RAM) and written over the same eight lines.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ks0108-core (addressing, shadow, text) │
//! └─────────────────────────────────────────┘
//!                     │ DisplayBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ks0108-drivers (ParallelBus)           │
//! └─────────────────────────────────────────┘
//!                     │ DataPort + embedded-hal OutputPin
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ks0108-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::FlexPin`] - Single GPIO that can switch between input and output
//! - [`port::DataPort`] - 8-bit bidirectional data port
//!
//! [`port::PinPort`] builds a `DataPort` from eight `FlexPin`s for boards
//! where D0-D7 are not wired to one register.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod port;

// Re-export key traits at crate root for convenience
pub use gpio::{Direction, FlexPin};
pub use port::{DataPort, PinPort};
