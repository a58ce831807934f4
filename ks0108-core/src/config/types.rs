//! Configuration type definitions
//!
//! Timing and behaviour settings for the display. Defaults reproduce the
//! original PIC18F4550 board at 40 MHz; boards with slower glass or longer
//! wiring raise the pulse widths.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default power stabilisation delay before the first status poll (ms)
pub const DEFAULT_POWER_UP_DELAY_MS: u32 = 150;

/// Default maximum status polls before reporting a timeout
pub const DEFAULT_BUSY_POLL_LIMIT: u32 = 10_000;

/// Default pause between status polls (µs)
pub const DEFAULT_BUSY_POLL_INTERVAL_US: u32 = 1;

/// Chip select line polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChipSelectPolarity {
    /// CS high selects the controller
    #[default]
    ActiveHigh,
    /// CS low selects the controller (common on modules with /CS1 /CS2)
    ActiveLow,
}

impl ChipSelectPolarity {
    /// Pin level for a given selection state
    pub const fn level(self, selected: bool) -> bool {
        match self {
            ChipSelectPolarity::ActiveHigh => selected,
            ChipSelectPolarity::ActiveLow => !selected,
        }
    }
}

/// Bus signal timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusTiming {
    /// Enable pulse high time (µs)
    pub enable_pulse_us: u32,
    /// Reset line low time (µs)
    pub reset_pulse_us: u32,
    /// Setup time between R/W, D/I, CS and the enable pulse on reads (µs)
    pub read_setup_us: u32,
    /// Delay after a read before the MCU drives the bus again (µs)
    pub turnaround_us: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            enable_pulse_us: 2,
            reset_pulse_us: 20,
            read_setup_us: 1,
            turnaround_us: 10,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Wait after power-on before talking to the controllers (ms)
    pub power_up_delay_ms: u32,
    /// Status polls allowed per wait before `HardwareTimeout`
    pub busy_poll_limit: u32,
    /// Pause between status polls (µs)
    pub busy_poll_interval_us: u32,
    /// Store blitted image bytes in the shadow framebuffer
    ///
    /// Off by default: an image blit leaves the shadow untouched, so
    /// pixel edits after a blit merge against pre-blit content.
    pub mirror_image_writes: bool,
    /// Chip select polarity
    pub chip_select: ChipSelectPolarity,
    /// Bus signal timing
    pub timing: BusTiming,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            power_up_delay_ms: DEFAULT_POWER_UP_DELAY_MS,
            busy_poll_limit: DEFAULT_BUSY_POLL_LIMIT,
            busy_poll_interval_us: DEFAULT_BUSY_POLL_INTERVAL_US,
            mirror_image_writes: false,
            chip_select: ChipSelectPolarity::ActiveHigh,
            timing: BusTiming::default(),
        }
    }
}

impl DisplayConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status poll limit
    pub fn with_poll_limit(mut self, limit: u32) -> Self {
        self.busy_poll_limit = limit;
        self
    }

    /// Enable or disable shadow mirroring of image blits
    pub fn with_image_mirroring(mut self, mirror: bool) -> Self {
        self.mirror_image_writes = mirror;
        self
    }

    /// Worst-case time spent in one busy wait (µs)
    pub fn busy_timeout_us(&self) -> u64 {
        self.busy_poll_limit as u64 * self.busy_poll_interval_us as u64
    }
}
