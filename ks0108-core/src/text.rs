//! Character and string rendering
//!
//! Characters occupy a 6-column cell: five glyph columns OR-merged into the
//! shadow, then one spacing column written back unchanged. A line holds 21
//! cells: 10 on each half plus one glyph split across the seam, drawn with
//! columns 0-2 at left 61-63 and columns 3-4 at right 0-1.
//!
//! String placement is planned up front by [`Layout::plan`] so that every
//! argument is validated before the first bus transfer.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;
use heapless::String;

use crate::addressing::{Side, HALF_WIDTH};
use crate::display::{Cursor, Display};
use crate::error::{InvalidArgument, Result};
use crate::font::{self, Glyph, CHAR_ADVANCE, GLYPH_WIDTH};
use crate::traits::DisplayBus;

/// Characters in one full display line
pub const MAX_LINE_CHARS: usize = 21;

/// Characters that fit on one half next to the seam glyph
const HALF_LINE_CHARS: usize = 10;

/// Left column used by left-justified text
const LEFT_MARGIN: u8 = 1;

/// Left-half column where a seam-split glyph starts
const SPLIT_COLUMN: u8 = 61;

/// Glyph columns drawn on the left half of a seam split
const SPLIT_LEFT_COLUMNS: usize = 3;

/// Right-half column following a seam-split glyph and its spacing
const AFTER_SPLIT_COLUMN: u8 = 3;

/// Right-half column used by a right-justified single glyph
const RIGHT_GLYPH_COLUMN: u8 = HALF_WIDTH - GLYPH_WIDTH;

/// Glyph or string placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Justify {
    /// Continue at the cursor
    #[default]
    AtCursor,
    /// Start at left column 1
    Left,
    /// Centre on the seam
    Center,
    /// End at right column 63
    Right,
}

impl TryFrom<u8> for Justify {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Justify::AtCursor),
            1 => Ok(Justify::Left),
            2 => Ok(Justify::Center),
            3 => Ok(Justify::Right),
            other => Err(InvalidArgument::Justify(other)),
        }
    }
}

/// Run of consecutive character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Side and column to select first, or `None` to continue at the cursor
    pub origin: Option<(Side, u8)>,
    /// First character index
    pub start: usize,
    /// One past the last character index
    pub end: usize,
}

impl Segment {
    const fn at(side: Side, column: u8, start: usize, end: usize) -> Self {
        Self {
            origin: Some((side, column)),
            start,
            end,
        }
    }

    /// Number of characters in the run
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the run draws nothing
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Placement of a string: cells before the seam, the split glyph, cells after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// First run of cells
    pub lead: Option<Segment>,
    /// Index of the character split across the seam
    pub split: Option<usize>,
    /// Run after the split glyph
    pub tail: Option<Segment>,
}

impl Layout {
    /// Plan a string of `len` characters
    ///
    /// Justified text longer than [`MAX_LINE_CHARS`] is rejected; text at
    /// the cursor is unbounded.
    pub fn plan(len: usize, justify: Justify) -> core::result::Result<Self, InvalidArgument> {
        if justify != Justify::AtCursor && len > MAX_LINE_CHARS {
            return Err(InvalidArgument::TextLength(len));
        }

        // Start column of `n` cells that end right before `end`
        let back = |end: u8, n: usize| end - CHAR_ADVANCE * n as u8;

        let layout = match justify {
            Justify::AtCursor => Layout {
                lead: Some(Segment {
                    origin: None,
                    start: 0,
                    end: len,
                }),
                split: None,
                tail: None,
            },
            Justify::Left if len <= HALF_LINE_CHARS => Layout {
                lead: Some(Segment::at(Side::Left, LEFT_MARGIN, 0, len)),
                split: None,
                tail: None,
            },
            Justify::Left => Layout {
                lead: Some(Segment::at(Side::Left, LEFT_MARGIN, 0, HALF_LINE_CHARS)),
                split: Some(HALF_LINE_CHARS),
                tail: Some(Segment::at(
                    Side::Right,
                    AFTER_SPLIT_COLUMN,
                    HALF_LINE_CHARS + 1,
                    len,
                )),
            },
            Justify::Center => {
                let half = len / 2;
                if len % 2 == 0 {
                    Layout {
                        lead: Some(Segment::at(Side::Left, back(HALF_WIDTH - 1, half), 0, half)),
                        split: None,
                        tail: Some(Segment::at(Side::Right, 0, half, len)),
                    }
                } else {
                    Layout {
                        lead: Some(Segment::at(Side::Left, back(SPLIT_COLUMN, half), 0, half)),
                        split: Some(half),
                        tail: Some(Segment::at(Side::Right, AFTER_SPLIT_COLUMN, half + 1, len)),
                    }
                }
            }
            Justify::Right if len <= HALF_LINE_CHARS => Layout {
                lead: Some(Segment::at(Side::Right, back(HALF_WIDTH - 1, len), 0, len)),
                split: None,
                tail: None,
            },
            Justify::Right => {
                let overflow = len - HALF_LINE_CHARS - 1;
                Layout {
                    lead: (overflow > 0).then(|| {
                        Segment::at(Side::Left, back(SPLIT_COLUMN - 1, overflow), 0, overflow)
                    }),
                    split: Some(overflow),
                    tail: Some(Segment::at(Side::Right, AFTER_SPLIT_COLUMN, overflow + 1, len)),
                }
            }
        };

        Ok(layout)
    }
}

impl<B, D> Display<B, D>
where
    B: DisplayBus,
    D: DelayNs,
{
    /// Draw one character by code (32..=126)
    ///
    /// `AtCursor` does not advance the cursor; follow with
    /// [`Display::advance_spacing`].
    pub fn draw_glyph(&mut self, code: u8, position: Justify) -> Result<()> {
        self.ensure_ready()?;
        let glyph = font::glyph(code)?;
        self.place_glyph(glyph, position)
    }

    /// Draw one character
    pub fn draw_char(&mut self, ch: char, position: Justify) -> Result<()> {
        self.ensure_ready()?;
        let glyph = font::glyph_for(ch)?;
        self.place_glyph(glyph, position)
    }

    /// Write the spacing column after a glyph and advance the cursor one cell
    ///
    /// The spacing column keeps whatever the shadow holds there.
    pub fn advance_spacing(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.space()
    }

    /// Draw a string on the current page
    ///
    /// On return the cursor sits on the cell following the last character.
    pub fn draw_string(&mut self, text: &str, justify: Justify) -> Result<()> {
        self.ensure_ready()?;
        font::check_text(text)?;
        // Printable ASCII only from here on, so bytes are characters
        let text = text.as_bytes();
        let layout = Layout::plan(text.len(), justify)?;

        if let Some(segment) = layout.lead {
            self.draw_segment(text, segment)?;
        }
        if let Some(index) = layout.split {
            self.draw_split(font::glyph(text[index])?)?;
        }
        if let Some(segment) = layout.tail {
            self.draw_segment(text, segment)?;
        }
        Ok(())
    }

    /// Format into a single line and draw it
    ///
    /// ```ignore
    /// display.select_page(Side::Right, 0)?;
    /// display.draw_formatted(format_args!("{:.2}V", delta), Justify::Right)?;
    /// ```
    pub fn draw_formatted(&mut self, args: fmt::Arguments<'_>, justify: Justify) -> Result<()> {
        let mut line: String<MAX_LINE_CHARS> = String::new();
        line.write_fmt(args)
            .map_err(|_| InvalidArgument::TextLength(MAX_LINE_CHARS + 1))?;
        self.draw_string(&line, justify)
    }

    fn place_glyph(&mut self, glyph: &Glyph, position: Justify) -> Result<()> {
        let page = self.cursor.page;
        match position {
            Justify::AtCursor => self.draw_at_cursor(glyph),
            Justify::Left => {
                self.set_page(Side::Left, page)?;
                self.set_column(Side::Left, LEFT_MARGIN)?;
                self.draw_at_cursor(glyph)
            }
            Justify::Right => {
                self.set_page(Side::Right, page)?;
                self.set_column(Side::Right, RIGHT_GLYPH_COLUMN)?;
                self.draw_at_cursor(glyph)
            }
            Justify::Center => self.draw_split(glyph),
        }
    }

    fn draw_segment(&mut self, text: &[u8], segment: Segment) -> Result<()> {
        if let Some((side, column)) = segment.origin {
            let page = self.cursor.page;
            self.set_page(side, page)?;
            self.set_column(side, column)?;
        }
        for &code in &text[segment.start..segment.end] {
            self.draw_at_cursor(font::glyph(code)?)?;
            self.space()?;
        }
        Ok(())
    }

    fn draw_at_cursor(&mut self, glyph: &Glyph) -> Result<()> {
        let Cursor { side, page, column } = self.cursor;
        self.seek(side, page, hardware_column(column))?;
        self.merge_columns(side, glyph)
    }

    /// Draw a glyph across the seam; leaves the cursor at right column 0
    fn draw_split(&mut self, glyph: &Glyph) -> Result<()> {
        let page = self.cursor.page;
        let (left, right) = glyph.split_at(SPLIT_LEFT_COLUMNS);

        self.set_page(Side::Left, page)?;
        self.set_column(Side::Left, SPLIT_COLUMN)?;
        self.wait_ready()?;
        self.merge_columns(Side::Left, left)?;

        self.set_page(Side::Right, page)?;
        self.set_column(Side::Right, 0)?;
        self.wait_ready()?;
        self.merge_columns(Side::Right, right)
    }

    fn space(&mut self) -> Result<()> {
        let Cursor { side, page, column } = self.cursor;
        let gap = column.wrapping_add(GLYPH_WIDTH as u16);
        self.seek(side, page, hardware_column(gap))?;
        let current = self.current_byte(side);
        self.write_byte(side, current, true)?;
        self.cursor.column = column.wrapping_add(CHAR_ADVANCE as u16);
        Ok(())
    }

    /// OR each column into the shadow byte at the running address
    fn merge_columns(&mut self, side: Side, columns: &[u8]) -> Result<()> {
        for &bits in columns {
            let merged = self.current_byte(side) | bits;
            self.write_byte(side, merged, true)?;
        }
        Ok(())
    }
}

fn hardware_column(column: u16) -> u8 {
    (column % HALF_WIDTH as u16) as u8
}
