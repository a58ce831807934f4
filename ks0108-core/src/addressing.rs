//! Addressing model
//!
//! The panel is two 64-column KS0108 controllers placed side by side. Each
//! controller has its own page (X) and column (Y) address registers; the
//! core presents them as a single 128-column logical surface.
//!
//! ```text
//!  global x:  0 ............ 63 | 64 ........... 127
//!  side:      Left (CS1)        | Right (CS2)
//!  column:    0 ............ 63 | 0 ............. 63
//!                               ^ seam
//! ```
//!
//! Display RAM is organised in pages of 8 rows. One data byte covers one
//! column of one page with bit 0 as the top row.

use crate::error::InvalidArgument;

/// Panel width in pixels
pub const WIDTH: u8 = 128;

/// Panel height in pixels
pub const HEIGHT: u8 = 64;

/// Columns per controller
pub const HALF_WIDTH: u8 = 64;

/// Pages per controller (8 rows each)
pub const PAGES: u8 = 8;

/// Rows per page
pub const PAGE_HEIGHT: u8 = 8;

/// Number of bytes in a full-screen buffer
pub const BUFFER_SIZE: usize = WIDTH as usize * PAGES as usize;

/// Controller selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Left controller (CS1), global columns 0-63
    #[default]
    Left,
    /// Right controller (CS2), global columns 64-127
    Right,
    /// Both chip selects asserted; the same command reaches both halves
    Both,
}

impl Side {
    /// Controllers addressed by this selector, as indices 0 (left) and 1 (right)
    pub fn chips(self) -> &'static [usize] {
        match self {
            Side::Left => &[0],
            Side::Right => &[1],
            Side::Both => &[0, 1],
        }
    }

    /// Whether the left controller is selected
    pub const fn selects_left(self) -> bool {
        matches!(self, Side::Left | Side::Both)
    }

    /// Whether the right controller is selected
    pub const fn selects_right(self) -> bool {
        matches!(self, Side::Right | Side::Both)
    }
}

impl TryFrom<u8> for Side {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Left),
            1 => Ok(Side::Right),
            2 => Ok(Side::Both),
            other => Err(InvalidArgument::Side(other)),
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => 0,
            Side::Right => 1,
            Side::Both => 2,
        }
    }
}

/// Validate a page number
pub fn check_page(page: u8) -> Result<u8, InvalidArgument> {
    if page < PAGES {
        Ok(page)
    } else {
        Err(InvalidArgument::Page(page))
    }
}

/// Validate a controller-local column
pub fn check_column(column: u8) -> Result<u8, InvalidArgument> {
    if column < HALF_WIDTH {
        Ok(column)
    } else {
        Err(InvalidArgument::Column(column))
    }
}

/// Global pixel position on the 128x64 panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    x: u8,
    y: u8,
}

impl Coordinate {
    /// Create a coordinate, rejecting anything off-panel
    pub fn new(x: u8, y: u8) -> Result<Self, InvalidArgument> {
        if x < WIDTH && y < HEIGHT {
            Ok(Self { x, y })
        } else {
            Err(InvalidArgument::Coordinate { x, y })
        }
    }

    /// Global column
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// Global row
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Controller, page and local column holding this pixel
    pub const fn target(&self) -> HardwareTarget {
        let (side, column) = if self.x < HALF_WIDTH {
            (Side::Left, self.x)
        } else {
            (Side::Right, self.x - HALF_WIDTH)
        };
        HardwareTarget {
            side,
            page: self.y / PAGE_HEIGHT,
            column,
        }
    }

    /// Row within the page (bit 0 = top)
    pub const fn bit(&self) -> u8 {
        self.y % PAGE_HEIGHT
    }

    /// Single-bit mask for this pixel within its column byte
    pub const fn mask(&self) -> u8 {
        1 << self.bit()
    }

    /// Index into the shadow framebuffer
    pub const fn shadow_index(&self) -> usize {
        self.x as usize + WIDTH as usize * (self.y / PAGE_HEIGHT) as usize
    }
}

/// Physical location of a display RAM byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareTarget {
    /// Controller selector
    pub side: Side,
    /// Page (0-7)
    pub page: u8,
    /// Controller-local column (0-63)
    pub column: u8,
}

impl HardwareTarget {
    /// Build a target from an explicit side/page/column triple
    pub fn new(side: Side, page: u8, column: u8) -> Result<Self, InvalidArgument> {
        Ok(Self {
            side,
            page: check_page(page)?,
            column: check_column(column)?,
        })
    }

    /// Index into the shadow framebuffer
    ///
    /// For `Both` this is the left-half index; the right-half copy lives
    /// [`HALF_WIDTH`] bytes further on.
    pub const fn shadow_index(&self) -> usize {
        shadow_index(chip_of(self.side), self.page, self.column as u16)
    }
}

const fn chip_of(side: Side) -> usize {
    match side {
        Side::Right => 1,
        Side::Left | Side::Both => 0,
    }
}

/// Shadow framebuffer index of a controller byte
///
/// `chip` is 0 for the left controller and 1 for the right. The column is
/// reduced modulo 64, matching the controller's wrapping Y counter.
pub const fn shadow_index(chip: usize, page: u8, column: u16) -> usize {
    page as usize * WIDTH as usize
        + chip * HALF_WIDTH as usize
        + (column % HALF_WIDTH as u16) as usize
}
