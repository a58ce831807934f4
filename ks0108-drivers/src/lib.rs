//! Hardware bus adapters
//!
//! This crate provides concrete implementations of the
//! [`DisplayBus`](ks0108_core::traits::DisplayBus) trait defined in
//! ks0108-core:
//!
//! - GPIO parallel bus (8-bit data port plus E, R/W, D/I, CS1, CS2, RST)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod parallel;

pub use parallel::{BusError, ControlPins, ParallelBus};
