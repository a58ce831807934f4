//! Shadow framebuffer
//!
//! The controllers are effectively write-only: reading display RAM needs a
//! bus turnaround and a dummy read per byte. Every byte written is mirrored
//! here so pixel-level read-modify-write works purely from memory.
//!
//! Layout matches the panel: `page * 128 + global_column`, so the left half
//! of each page occupies indices 0-63 and the right half 64-127.

use crate::addressing::{check_page, shadow_index, Coordinate, BUFFER_SIZE, HALF_WIDTH, WIDTH};

fn check_chip_page(chip: usize, page: u8) -> Option<()> {
    (chip < 2 && check_page(page).is_ok()).then_some(())
}

/// In-memory mirror of display RAM for both controllers
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a cleared framebuffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_SIZE],
        }
    }

    /// Byte at a flat index
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Byte held by a controller at page/column
    ///
    /// `chip` is 0 (left) or 1 (right); the column wraps modulo 64. Returns
    /// `None` for an unknown chip or a page past 7.
    pub fn at(&self, chip: usize, page: u8, column: u16) -> Option<u8> {
        check_chip_page(chip, page)?;
        Some(self.byte(chip, page, column))
    }

    /// Byte at an address already known to be on-panel
    pub(crate) fn byte(&self, chip: usize, page: u8, column: u16) -> u8 {
        self.bytes[shadow_index(chip, page, column)]
    }

    /// Store a byte for a controller at page/column
    pub(crate) fn store(&mut self, chip: usize, page: u8, column: u16, value: u8) {
        self.bytes[shadow_index(chip, page, column)] = value;
    }

    /// One page row across both halves (128 bytes)
    pub fn page(&self, page: u8) -> Option<&[u8]> {
        check_page(page).ok()?;
        let start = page as usize * WIDTH as usize;
        Some(&self.bytes[start..start + WIDTH as usize])
    }

    /// One controller's half of a page (64 bytes)
    pub fn half_page(&self, chip: usize, page: u8) -> Option<&[u8]> {
        check_chip_page(chip, page)?;
        let start = page as usize * WIDTH as usize + chip * HALF_WIDTH as usize;
        Some(&self.bytes[start..start + HALF_WIDTH as usize])
    }

    /// Whether a pixel is set in the mirror; off-panel pixels never are
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        Coordinate::new(x, y)
            .map(|coord| self.bytes[coord.shadow_index()] & coord.mask() != 0)
            .unwrap_or(false)
    }

    /// Whether every byte is zero
    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Raw view of all 1024 bytes
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.bytes.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Framebuffer")
            .field("non_zero_bytes", &lit)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Framebuffer {
    fn format(&self, f: defmt::Formatter) {
        let lit = self.bytes.iter().filter(|&&b| b != 0).count();
        defmt::write!(f, "Framebuffer[{} non-zero]", lit);
    }
}
