//! GPIO pin abstractions
//!
//! Provides the bidirectional pin trait used for the KS0108 data lines.
//! Control lines (E, R/W, D/I, CS1, CS2, RST) are plain outputs and use
//! `embedded_hal::digital::OutputPin` directly.

/// Data direction of a pin or port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Driven by the MCU
    #[default]
    Output,
    /// High impedance, sampled by the MCU
    Input,
}

/// Digital pin that can be reconfigured between input and output
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip (TRIS/MODER/OE registers).
pub trait FlexPin {
    /// Switch the pin direction
    fn set_direction(&mut self, direction: Direction);

    /// Drive the output latch (only visible while in output mode)
    fn set_level(&mut self, high: bool);

    /// Sample the pin (meaningful while in input mode)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Switch to output mode
    fn set_as_output(&mut self) {
        self.set_direction(Direction::Output);
    }

    /// Switch to input mode
    fn set_as_input(&mut self) {
        self.set_direction(Direction::Input);
    }
}
