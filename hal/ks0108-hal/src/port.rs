//! 8-bit data port abstractions
//!
//! The KS0108 exchanges bytes over D0-D7. Boards that wire the bus to a
//! single GPIO register (PORTD on the original PIC18 board) implement
//! [`DataPort`] directly; scattered pins can be grouped with [`PinPort`].

use crate::gpio::{Direction, FlexPin};

/// 8-bit bidirectional parallel port
pub trait DataPort {
    /// Switch all eight lines between driving and sampling
    fn set_direction(&mut self, direction: Direction);

    /// Put a byte on the bus (bit 0 = D0)
    fn write(&mut self, value: u8);

    /// Sample the bus (bit 0 = D0)
    fn read(&self) -> u8;
}

/// Data port made of eight individual pins, `pins[0]` = D0
pub struct PinPort<P> {
    pins: [P; 8],
    direction: Direction,
}

impl<P: FlexPin> PinPort<P> {
    /// Group eight pins into a port, starting in output mode
    pub fn new(pins: [P; 8]) -> Self {
        let mut port = Self {
            pins,
            direction: Direction::Input,
        };
        port.set_direction(Direction::Output);
        port
    }

    /// Current port direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Release the pins
    pub fn release(self) -> [P; 8] {
        self.pins
    }
}

impl<P: FlexPin> DataPort for PinPort<P> {
    fn set_direction(&mut self, direction: Direction) {
        if self.direction == direction {
            return;
        }
        for pin in &mut self.pins {
            pin.set_direction(direction);
        }
        self.direction = direction;
    }

    fn write(&mut self, value: u8) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            pin.set_level(value & (1 << bit) != 0);
        }
    }

    fn read(&self) -> u8 {
        self.pins
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, pin)| acc | ((pin.is_high() as u8) << bit))
    }
}
