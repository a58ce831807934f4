//! GPIO parallel bus for KS0108 controllers
//!
//! Drives the 8-bit data port and the E, R/W, D/I (RS), CS1, CS2 and RST
//! lines directly from GPIO. Writes latch on the falling edge of E; reads
//! sample the port while E is high.
//!
//! ```ignore
//! let pins = ControlPins { enable, read_write, data_select, cs1, cs2, reset };
//! let bus = ParallelBus::new(port, pins, delay, BusTiming::default(), ChipSelectPolarity::ActiveHigh)?;
//! let mut display = Display::new(bus, delay2, DisplayConfig::new());
//! display.init()?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use ks0108_core::addressing::Side;
use ks0108_core::config::{BusTiming, ChipSelectPolarity, DisplayConfig};
use ks0108_core::traits::DisplayBus;
use ks0108_hal::{DataPort, Direction};

/// Bus adapter error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// A control line could not be driven
    Pin,
    /// Data read requested with both controllers selected
    AmbiguousRead,
}

/// Control lines of the panel
pub struct ControlPins<EN, RW, RS, CS1, CS2, RST> {
    /// Enable strobe (E)
    pub enable: EN,
    /// Read/write select, high = read
    pub read_write: RW,
    /// Data/instruction select (D/I, RS), high = data
    pub data_select: RS,
    /// Left controller select
    pub cs1: CS1,
    /// Right controller select
    pub cs2: CS2,
    /// Reset, active low
    pub reset: RST,
}

/// KS0108 bus over GPIO
pub struct ParallelBus<PORT, EN, RW, RS, CS1, CS2, RST, D> {
    port: PORT,
    pins: ControlPins<EN, RW, RS, CS1, CS2, RST>,
    delay: D,
    timing: BusTiming,
    chip_select: ChipSelectPolarity,
}

fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), BusError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| BusError::Pin)
}

impl<PORT, EN, RW, RS, CS1, CS2, RST, D> ParallelBus<PORT, EN, RW, RS, CS1, CS2, RST, D>
where
    PORT: DataPort,
    EN: OutputPin,
    RW: OutputPin,
    RS: OutputPin,
    CS1: OutputPin,
    CS2: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create the bus and park the lines: E low, write mode, both
    /// controllers deselected, RST released
    pub fn new(
        port: PORT,
        pins: ControlPins<EN, RW, RS, CS1, CS2, RST>,
        delay: D,
        timing: BusTiming,
        chip_select: ChipSelectPolarity,
    ) -> Result<Self, BusError> {
        let mut bus = Self {
            port,
            pins,
            delay,
            timing,
            chip_select,
        };
        bus.port.set_direction(Direction::Output);
        drive(&mut bus.pins.enable, false)?;
        drive(&mut bus.pins.read_write, false)?;
        drive(&mut bus.pins.reset, true)?;
        bus.select(None)?;
        Ok(bus)
    }

    /// Create the bus with timing and polarity from a display configuration
    pub fn from_config(
        port: PORT,
        pins: ControlPins<EN, RW, RS, CS1, CS2, RST>,
        delay: D,
        config: &DisplayConfig,
    ) -> Result<Self, BusError> {
        Self::new(port, pins, delay, config.timing, config.chip_select)
    }

    /// Release the port, pins and delay
    pub fn release(self) -> (PORT, ControlPins<EN, RW, RS, CS1, CS2, RST>, D) {
        (self.port, self.pins, self.delay)
    }

    /// Assert chip selects for `side`, or deselect both with `None`
    fn select(&mut self, side: Option<Side>) -> Result<(), BusError> {
        let left = side.is_some_and(Side::selects_left);
        let right = side.is_some_and(Side::selects_right);
        drive(&mut self.pins.cs1, self.chip_select.level(left))?;
        drive(&mut self.pins.cs2, self.chip_select.level(right))
    }

    fn strobe(&mut self) -> Result<(), BusError> {
        drive(&mut self.pins.enable, true)?;
        self.delay.delay_us(self.timing.enable_pulse_us);
        drive(&mut self.pins.enable, false)
    }

    fn write(&mut self, side: Side, data: bool, byte: u8) -> Result<(), BusError> {
        drive(&mut self.pins.read_write, false)?;
        drive(&mut self.pins.data_select, data)?;
        self.select(Some(side))?;
        self.port.write(byte);
        self.strobe()
    }

    fn read(&mut self, side: Side, data: bool) -> Result<u8, BusError> {
        self.port.write(0x00);
        self.port.set_direction(Direction::Input);

        let value = self.sample(side, data);

        // Put the lines back in write mode even when sampling failed
        let restored = drive(&mut self.pins.read_write, false);
        self.delay.delay_us(self.timing.turnaround_us);
        self.port.set_direction(Direction::Output);

        let value = value?;
        restored?;
        Ok(value)
    }

    fn sample(&mut self, side: Side, data: bool) -> Result<u8, BusError> {
        drive(&mut self.pins.data_select, data)?;
        drive(&mut self.pins.read_write, true)?;
        self.select(Some(side))?;
        self.delay.delay_us(self.timing.read_setup_us);

        drive(&mut self.pins.enable, true)?;
        self.delay.delay_us(self.timing.enable_pulse_us);
        let value = self.port.read();
        drive(&mut self.pins.enable, false)?;
        Ok(value)
    }
}

impl<PORT, EN, RW, RS, CS1, CS2, RST, D> DisplayBus
    for ParallelBus<PORT, EN, RW, RS, CS1, CS2, RST, D>
where
    PORT: DataPort,
    EN: OutputPin,
    RW: OutputPin,
    RS: OutputPin,
    CS1: OutputPin,
    CS2: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = BusError;

    fn send_command(&mut self, side: Side, byte: u8) -> Result<(), BusError> {
        self.write(side, false, byte)
    }

    fn send_data(&mut self, side: Side, byte: u8) -> Result<(), BusError> {
        self.write(side, true, byte)
    }

    /// Status is read with both controllers selected
    fn read_status(&mut self) -> Result<u8, BusError> {
        self.read(Side::Both, false)
    }

    fn pulse_reset(&mut self) -> Result<(), BusError> {
        self.port.write(0x00);
        drive(&mut self.pins.reset, false)?;
        self.delay.delay_us(self.timing.reset_pulse_us);
        drive(&mut self.pins.reset, true)
    }

    fn read_data(&mut self, side: Side) -> Result<u8, BusError> {
        if side == Side::Both {
            return Err(BusError::AmbiguousRead);
        }
        self.read(side, true)
    }
}
