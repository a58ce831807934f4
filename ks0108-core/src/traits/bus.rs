//! Parallel bus contract for the KS0108 controller pair
//!
//! The core never toggles pins itself. It talks to the panel through
//! [`DisplayBus`], which owns the physical protocol: enable pulses, bus
//! direction changes for reads, chip selects and the reset line.

use crate::addressing::Side;

/// Status bit: controller is executing an instruction
pub const STATUS_BUSY: u8 = 0x80;

/// Status bit: display output is off
pub const STATUS_OFF: u8 = 0x20;

/// Status bit: controller is in its reset sequence
pub const STATUS_RESET: u8 = 0x10;

/// Bits that must be clear before a new instruction is accepted
pub const STATUS_NOT_READY: u8 = STATUS_BUSY | STATUS_RESET;

/// KS0108 instruction set
pub mod cmd {
    /// Display on/off (bit 0 = on)
    pub const DISPLAY_ON_OFF: u8 = 0b0011_1110;
    /// Set Y address (column), low 6 bits
    pub const SET_ADDRESS: u8 = 0b0100_0000;
    /// Set X address (page), low 3 bits
    pub const SET_PAGE: u8 = 0b1011_1000;
    /// Display start line, low 6 bits
    pub const SET_START_LINE: u8 = 0b1100_0000;

    /// Encode a display on/off instruction
    pub const fn display_on(on: bool) -> u8 {
        DISPLAY_ON_OFF | on as u8
    }

    /// Encode a page select instruction
    pub const fn page(page: u8) -> u8 {
        SET_PAGE | (page & 0x07)
    }

    /// Encode a column select instruction
    pub const fn column(column: u8) -> u8 {
        SET_ADDRESS | (column & 0x3F)
    }

    /// Encode a start line instruction
    pub const fn start_line(line: u8) -> u8 {
        SET_START_LINE | (line & 0x3F)
    }
}

/// Decoded controller status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u8);

impl Status {
    /// Controller is busy
    pub const fn is_busy(self) -> bool {
        self.0 & STATUS_BUSY != 0
    }

    /// Controller is resetting
    pub const fn is_resetting(self) -> bool {
        self.0 & STATUS_RESET != 0
    }

    /// Display output is enabled
    pub const fn is_on(self) -> bool {
        self.0 & STATUS_OFF == 0
    }

    /// Controller accepts instructions
    pub const fn is_ready(self) -> bool {
        self.0 & STATUS_NOT_READY == 0
    }
}

/// Trait for the KS0108 bus adapter
///
/// Implementations drive the physical interface (GPIO bit-banging, an
/// external bus controller, or a simulator in tests). All transfers are
/// blocking; the core serialises access.
pub trait DisplayBus {
    /// Adapter error type
    type Error;

    /// Write an instruction byte (D/I low) to the selected controller(s)
    fn send_command(&mut self, side: Side, byte: u8) -> Result<(), Self::Error>;

    /// Write a display RAM byte (D/I high) to the selected controller(s)
    ///
    /// The controller stores the byte at its current page/column and
    /// increments the column, wrapping from 63 to 0.
    fn send_data(&mut self, side: Side, byte: u8) -> Result<(), Self::Error>;

    /// Read the status byte with both chips selected
    ///
    /// Bit 7 = BUSY, bit 5 = OFF, bit 4 = RESET.
    fn read_status(&mut self) -> Result<u8, Self::Error>;

    /// Pulse the reset line
    fn pulse_reset(&mut self) -> Result<(), Self::Error>;

    /// Run one data read cycle on a single controller
    ///
    /// The KS0108 returns the value latched by the previous read cycle, then
    /// latches the byte at its current address and increments the column.
    /// Adapters perform exactly one cycle; `Display::read_data` issues the
    /// extra latch cycle.
    fn read_data(&mut self, side: Side) -> Result<u8, Self::Error>;
}
