//! Board-agnostic rendering engine for dual-controller KS0108 LCDs
//!
//! A 128x64 KS0108 panel is two 64x64 controllers side by side, each with
//! its own chip select. This crate presents them as one surface:
//!
//! - Addressing model (side, page, column, global coordinates)
//! - Shadow framebuffer mirroring display RAM
//! - Pixel plotting, axes overlay and page clearing
//! - 5x8 text with left, centre and right justification across the seam
//! - Full-screen image blit
//! - Lifecycle state machine and bounded busy polling
//! - Configuration types
//!
//! Bus access is abstracted by [`traits::DisplayBus`]; see `ks0108-drivers`
//! for a GPIO implementation.
//!
//! ```ignore
//! let mut display = Display::new(bus, delay, DisplayConfig::new());
//! display.init()?;
//! display.draw_axes()?;
//! display.select_page(Side::Left, 0)?;
//! display.draw_string("RECORDING", Justify::Center)?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod addressing;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod image;
pub mod plot;
pub mod state;
pub mod text;
pub mod traits;

#[cfg(test)]
mod mock;

pub use addressing::{Coordinate, HardwareTarget, Side};
pub use config::DisplayConfig;
pub use display::{Cursor, Display};
pub use error::{Error, InvalidArgument, Result};
pub use framebuffer::Framebuffer;
pub use plot::PlotMode;
pub use state::State;
pub use text::Justify;
pub use traits::DisplayBus;
