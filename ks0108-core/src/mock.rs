//! Simulated KS0108 pair for tests
//!
//! [`SimBus`] models both controllers' display RAM, page/column registers
//! with column auto-increment, start line, on/off and the BUSY/RESET status
//! bits, and logs every bus transaction.

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::addressing::{Side, BUFFER_SIZE};
use crate::config::DisplayConfig;
use crate::display::Display;
use crate::traits::{cmd, DisplayBus, STATUS_BUSY, STATUS_OFF, STATUS_RESET};

/// One logged bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Command(Side, u8),
    Data(Side, u8),
    Status,
    Reset,
    Read(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimError;

pub struct SimBus {
    pub ram: [[[u8; 64]; 8]; 2],
    pub page: [u8; 2],
    pub column: [u8; 2],
    pub start_line: [u8; 2],
    pub on: bool,
    pub log: Vec<Op>,
    pub status_reads: usize,
    /// Status polls reporting RESET after a reset pulse
    pub reset_polls: u32,
    reset_remaining: u32,
    /// Status polls reporting BUSY after every instruction
    pub busy_polls: u32,
    busy_remaining: u32,
    pub stuck_busy: bool,
    pub fail: bool,
    /// Output latch loaded by the previous data read
    latch: [u8; 2],
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            ram: [[[0xFF; 64]; 8]; 2],
            page: [0; 2],
            column: [0; 2],
            start_line: [0; 2],
            on: false,
            log: Vec::new(),
            status_reads: 0,
            reset_polls: 0,
            reset_remaining: 0,
            busy_polls: 0,
            busy_remaining: 0,
            stuck_busy: false,
            fail: false,
            latch: [0; 2],
        }
    }

    fn check(&self) -> Result<(), SimError> {
        if self.fail {
            Err(SimError)
        } else {
            Ok(())
        }
    }

    /// RAM byte at a global column and page
    pub fn ram_byte(&self, x: u8, page: u8) -> u8 {
        let chip = (x / 64) as usize;
        self.ram[chip][page as usize][(x % 64) as usize]
    }

    /// Controller RAM flattened in shadow framebuffer order
    pub fn ram_bytes(&self) -> [u8; BUFFER_SIZE] {
        let mut out = [0u8; BUFFER_SIZE];
        for page in 0..8 {
            for x in 0..128u8 {
                out[page * 128 + x as usize] = self.ram_byte(x, page as u8);
            }
        }
        out
    }

    pub fn ram_is_blank(&self) -> bool {
        self.ram_bytes().iter().all(|&b| b == 0)
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        self.status_reads = 0;
    }

    /// Data bytes written since the log was last cleared
    pub fn data_writes(&self) -> Vec<(Side, u8)> {
        self.log
            .iter()
            .filter_map(|op| match op {
                Op::Data(side, byte) => Some((*side, *byte)),
                _ => None,
            })
            .collect()
    }

    /// Instruction bytes written since the log was last cleared
    pub fn commands(&self) -> Vec<(Side, u8)> {
        self.log
            .iter()
            .filter_map(|op| match op {
                Op::Command(side, byte) => Some((*side, *byte)),
                _ => None,
            })
            .collect()
    }

    fn execute(&mut self, chip: usize, byte: u8) {
        if byte & 0xFE == cmd::DISPLAY_ON_OFF {
            self.on = byte & 1 != 0;
        } else if byte & 0xF8 == cmd::SET_PAGE {
            self.page[chip] = byte & 0x07;
        } else if byte & 0xC0 == cmd::SET_ADDRESS {
            self.column[chip] = byte & 0x3F;
        } else if byte & 0xC0 == cmd::SET_START_LINE {
            self.start_line[chip] = byte & 0x3F;
        }
    }
}

impl DisplayBus for SimBus {
    type Error = SimError;

    fn send_command(&mut self, side: Side, byte: u8) -> Result<(), SimError> {
        self.check()?;
        self.log.push(Op::Command(side, byte));
        for &chip in side.chips() {
            self.execute(chip, byte);
        }
        self.busy_remaining = self.busy_polls;
        Ok(())
    }

    fn send_data(&mut self, side: Side, byte: u8) -> Result<(), SimError> {
        self.check()?;
        self.log.push(Op::Data(side, byte));
        for &chip in side.chips() {
            let page = self.page[chip] as usize;
            let column = self.column[chip] as usize;
            self.ram[chip][page][column] = byte;
            self.column[chip] = ((column + 1) % 64) as u8;
        }
        Ok(())
    }

    fn read_status(&mut self) -> Result<u8, SimError> {
        self.check()?;
        self.log.push(Op::Status);
        self.status_reads += 1;

        let mut status = if self.on { 0 } else { STATUS_OFF };
        if self.stuck_busy {
            status |= STATUS_BUSY;
        } else if self.reset_remaining > 0 {
            self.reset_remaining -= 1;
            status |= STATUS_RESET | STATUS_BUSY;
        } else if self.busy_remaining > 0 {
            self.busy_remaining -= 1;
            status |= STATUS_BUSY;
        }
        Ok(status)
    }

    fn pulse_reset(&mut self) -> Result<(), SimError> {
        self.check()?;
        self.log.push(Op::Reset);
        self.on = false;
        self.start_line = [0; 2];
        self.column = [0; 2];
        self.reset_remaining = self.reset_polls;
        Ok(())
    }

    fn read_data(&mut self, side: Side) -> Result<u8, SimError> {
        self.check()?;
        self.log.push(Op::Read(side));
        let chip = side.chips()[0];
        let page = self.page[chip] as usize;
        let column = self.column[chip] as usize;
        // Returns the previously latched byte, then latches the addressed one
        let value = self.latch[chip];
        self.latch[chip] = self.ram[chip][page][column];
        self.column[chip] = ((column + 1) % 64) as u8;
        Ok(value)
    }
}

/// Delay that only accumulates requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// Initialised display on a fresh simulator
pub fn ready_display() -> Display<SimBus, MockDelay> {
    ready_display_with(DisplayConfig::new())
}

pub fn ready_display_with(config: DisplayConfig) -> Display<SimBus, MockDelay> {
    let mut display = Display::new(SimBus::new(), MockDelay::default(), config);
    display.init().unwrap();
    display
}
