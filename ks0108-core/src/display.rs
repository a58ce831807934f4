//! Display engine
//!
//! [`Display`] owns the bus adapter, the shadow framebuffer and the cursor.
//! Everything that reaches display RAM goes through [`Display::write_byte`],
//! which also mirrors the byte into the shadow at the address the
//! controller used. The controller's column counter auto-increments and wraps
//! at 64, so the engine tracks each chip's address to keep the mirror exact.
//!
//! Positioning, text, pixel and image operations live in their own modules
//! as further `impl` blocks on this type.

use embedded_hal::delay::DelayNs;

use crate::addressing::{check_column, check_page, Side, HALF_WIDTH, PAGES};
use crate::config::DisplayConfig;
use crate::error::{Error, InvalidArgument, Result};
use crate::framebuffer::Framebuffer;
use crate::state::{Event, State};
use crate::traits::{cmd, DisplayBus, Status};

/// Highest display start line
pub const MAX_START_LINE: u8 = 63;

/// Logical drawing position
///
/// `column` counts controller-local columns but is not wrapped: text drawn
/// at the cursor keeps advancing it by 6 per character. The hardware column
/// is `column % 64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Controller selected by the last column select
    pub side: Side,
    /// Page selected by the last page select
    pub page: u8,
    /// Column selected by the last column select, advanced by text spacing
    pub column: u16,
}

/// Address register contents of one controller, `None` when unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ChipAddress {
    page: Option<u8>,
    column: Option<u8>,
}

pub(crate) fn bus_err<E>(_: E) -> Error {
    Error::Bus
}

/// Dual-controller 128x64 display
pub struct Display<B, D> {
    bus: B,
    delay: D,
    config: DisplayConfig,
    state: State,
    pub(crate) cursor: Cursor,
    pub(crate) shadow: Framebuffer,
    address: [ChipAddress; 2],
}

impl<B, D> Display<B, D>
where
    B: DisplayBus,
    D: DelayNs,
{
    /// Create a display in the `Uninitialized` state
    ///
    /// Nothing is sent to the bus until [`Display::init`].
    pub fn new(bus: B, delay: D, config: DisplayConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            state: State::Uninitialized,
            cursor: Cursor::default(),
            shadow: Framebuffer::new(),
            address: [ChipAddress::default(); 2],
        }
    }

    /// Run the power-up sequence
    ///
    /// Waits for supply stabilisation, waits for the controllers to leave
    /// BUSY/RESET, pulses reset, waits again, switches the display on and
    /// clears it. May be called again to re-initialise.
    pub fn init(&mut self) -> Result<()> {
        self.state = self.state.transition(Event::InitRequested);

        #[cfg(feature = "defmt")]
        defmt::debug!("ks0108: init, power-up wait {} ms", self.config.power_up_delay_ms);

        match self.run_init() {
            Ok(()) => {
                self.state = self.state.transition(Event::InitComplete);
                #[cfg(feature = "defmt")]
                defmt::debug!("ks0108: ready");
                Ok(())
            }
            Err(e) => {
                self.state = self.state.transition(Event::InitFailed);
                #[cfg(feature = "defmt")]
                defmt::warn!("ks0108: init failed: {}", e);
                Err(e)
            }
        }
    }

    fn run_init(&mut self) -> Result<()> {
        self.delay.delay_ms(self.config.power_up_delay_ms);
        self.wait_ready()?;

        self.bus.pulse_reset().map_err(bus_err)?;
        self.address = [ChipAddress::default(); 2];
        self.wait_ready()?;

        self.command(Side::Both, cmd::display_on(true))?;
        self.clear_unchecked()
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Current cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Shadow copy of display RAM
    pub fn shadow(&self) -> &Framebuffer {
        &self.shadow
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Borrow the bus adapter
    pub fn bus(&self) -> &B {
        &self.bus
    }

    #[cfg(test)]
    pub(crate) fn bus_mut_for_test(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Tear down and return the bus adapter and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    // ── Positioning ─────────────────────────────────────────────────────

    /// Select a page on one or both controllers
    pub fn select_page(&mut self, side: Side, page: u8) -> Result<()> {
        self.ensure_ready()?;
        let page = check_page(page)?;
        self.set_page(side, page)
    }

    /// Select a column on one or both controllers
    pub fn select_column(&mut self, side: Side, column: u8) -> Result<()> {
        self.ensure_ready()?;
        let column = check_column(column)?;
        self.set_column(side, column)
    }

    /// Set the display start line (vertical scroll origin)
    ///
    /// Only the controller's output is scrolled; the shadow and cursor keep
    /// RAM coordinates.
    pub fn start_line(&mut self, side: Side, line: u8) -> Result<()> {
        self.ensure_ready()?;
        if line > MAX_START_LINE {
            return Err(InvalidArgument::StartLine(line).into());
        }
        self.command(side, cmd::start_line(line))
    }

    /// Switch the display output on or off; RAM is retained
    pub fn set_display_on(&mut self, on: bool) -> Result<()> {
        self.ensure_ready()?;
        self.command(Side::Both, cmd::display_on(on))
    }

    /// Read the display RAM byte under the cursor
    ///
    /// Not used by any drawing path. The chip is addressed at the cursor and
    /// read twice: the first cycle only loads the controller's output latch.
    /// Reads advance the controller's column, so the tracked address is
    /// discarded and the next write re-addresses the chip.
    pub fn read_data(&mut self) -> Result<u8> {
        self.ensure_ready()?;
        let Cursor { side, page, column } = self.cursor;
        if side == Side::Both {
            return Err(InvalidArgument::Side(u8::from(side)).into());
        }

        self.seek(side, page, (column % HALF_WIDTH as u16) as u8)?;
        let read = self.latched_read(side);
        for &chip in side.chips() {
            self.address[chip].column = None;
        }
        read
    }

    fn latched_read(&mut self, side: Side) -> Result<u8> {
        self.bus.read_data(side).map_err(bus_err)?;
        self.wait_ready()?;
        self.bus.read_data(side).map_err(bus_err)
    }

    /// Clear display RAM and the shadow, and home the cursor
    pub fn clear_display(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.clear_unchecked()
    }

    /// Write zeros across both halves page by page; each byte is mirrored,
    /// so an aborted clear leaves the shadow matching what was written
    fn clear_unchecked(&mut self) -> Result<()> {
        for page in 0..PAGES {
            self.set_page(Side::Both, page)?;
            self.set_column(Side::Both, 0)?;
            self.wait_ready()?;
            for _ in 0..HALF_WIDTH {
                self.write_byte(Side::Both, 0x00, true)?;
            }
        }
        self.cursor = Cursor::default();
        Ok(())
    }

    // ── Internal primitives ─────────────────────────────────────────────

    pub(crate) fn ensure_ready(&self) -> Result<()> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Poll status until BUSY and RESET clear, bounded by the poll limit
    pub(crate) fn wait_ready(&mut self) -> Result<()> {
        for _ in 0..self.config.busy_poll_limit.max(1) {
            let status = Status(self.bus.read_status().map_err(bus_err)?);
            if status.is_ready() {
                return Ok(());
            }
            self.delay.delay_us(self.config.busy_poll_interval_us);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "ks0108: controller busy after {} polls",
            self.config.busy_poll_limit
        );

        Err(Error::HardwareTimeout)
    }

    /// Wait for ready, then send an instruction
    pub(crate) fn command(&mut self, side: Side, byte: u8) -> Result<()> {
        self.wait_ready()?;
        self.bus.send_command(side, byte).map_err(bus_err)
    }

    /// Select a page without validation; updates the cursor page
    pub(crate) fn set_page(&mut self, side: Side, page: u8) -> Result<()> {
        self.command(side, cmd::page(page))?;
        for &chip in side.chips() {
            self.address[chip].page = Some(page);
        }
        self.cursor.page = page;
        Ok(())
    }

    /// Select a column without validation; updates cursor side and column
    pub(crate) fn set_column(&mut self, side: Side, column: u8) -> Result<()> {
        self.command(side, cmd::column(column))?;
        for &chip in side.chips() {
            self.address[chip].column = Some(column);
        }
        self.cursor.side = side;
        self.cursor.column = column as u16;
        Ok(())
    }

    /// Bring the selected controllers to page/column if they are elsewhere
    ///
    /// Issues no instructions when the tracked address already matches,
    /// then waits for ready ahead of a data burst.
    pub(crate) fn seek(&mut self, side: Side, page: u8, column: u8) -> Result<()> {
        let chips = side.chips();

        if chips.iter().any(|&c| self.address[c].page != Some(page)) {
            self.command(side, cmd::page(page))?;
            for &chip in chips {
                self.address[chip].page = Some(page);
            }
        }
        if chips.iter().any(|&c| self.address[c].column != Some(column)) {
            self.command(side, cmd::column(column))?;
            for &chip in chips {
                self.address[chip].column = Some(column);
            }
        }

        self.wait_ready()
    }

    /// Shadow byte at the selected controllers' current address
    ///
    /// With both controllers selected the halves are OR-ed; the following
    /// write stores the same byte into both.
    pub(crate) fn current_byte(&self, side: Side) -> u8 {
        side.chips().iter().fold(0, |acc, &chip| {
            match (self.address[chip].page, self.address[chip].column) {
                (Some(page), Some(column)) => acc | self.shadow.byte(chip, page, column as u16),
                _ => acc,
            }
        })
    }

    /// Write one data byte and advance the tracked column
    ///
    /// With `mirror` the byte is also stored in the shadow; it is only
    /// stored once the bus accepted it.
    pub(crate) fn write_byte(&mut self, side: Side, value: u8, mirror: bool) -> Result<()> {
        self.bus.send_data(side, value).map_err(bus_err)?;
        for &chip in side.chips() {
            let address = &mut self.address[chip];
            if let (Some(page), Some(column)) = (address.page, address.column) {
                if mirror {
                    self.shadow.store(chip, page, column as u16, value);
                }
                address.column = Some((column + 1) % HALF_WIDTH);
            }
        }
        Ok(())
    }
}
