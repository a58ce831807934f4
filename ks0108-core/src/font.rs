//! 5x8 bitmap font
//!
//! Printable ASCII (32-126). Each glyph is five column bytes with bit 0 as
//! the top row, the controller's native order, so glyph bytes go to display
//! RAM without transformation. Glyphs leave row 0 blank; characters are
//! drawn in a 6-column cell (5 glyph columns + 1 spacing column).

use crate::error::InvalidArgument;

/// Glyph width in columns
pub const GLYPH_WIDTH: u8 = 5;

/// Horizontal advance per character (glyph + one blank column)
pub const CHAR_ADVANCE: u8 = GLYPH_WIDTH + 1;

/// First character with a glyph
pub const FIRST_CHAR: u8 = b' ';

/// Last character with a glyph
pub const LAST_CHAR: u8 = b'~';

/// Column bitmap of one character
pub type Glyph = [u8; GLYPH_WIDTH as usize];

/// Font data, indexed by `code - 32`
pub const FONT_5X8: [Glyph; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0xBE, 0x00, 0x00], // !
    [0x00, 0x0E, 0x00, 0x0E, 0x00], // "
    [0x44, 0xFE, 0x44, 0xFE, 0x44], // #
    [0x48, 0x54, 0xFE, 0x54, 0x24], // $
    [0x46, 0x26, 0x10, 0xC8, 0xC4], // %
    [0x6C, 0x92, 0xAA, 0x44, 0x80], // &
    [0x00, 0x08, 0x06, 0x00, 0x00], // '
    [0x00, 0x00, 0x7C, 0x82, 0x00], // (
    [0x00, 0x82, 0x7C, 0x00, 0x00], // )
    [0x28, 0x10, 0x7C, 0x10, 0x28], // *
    [0x10, 0x10, 0x7C, 0x10, 0x10], // +
    [0x00, 0x80, 0x60, 0x00, 0x00], // ,
    [0x10, 0x10, 0x10, 0x10, 0x10], // -
    [0x00, 0xC0, 0xC0, 0x00, 0x00], // .
    [0x40, 0x20, 0x10, 0x08, 0x04], // /
    [0x7C, 0x82, 0x82, 0x7C, 0x00], // 0
    [0x00, 0x84, 0xFE, 0x80, 0x00], // 1
    [0x84, 0xC2, 0xA2, 0x92, 0x8C], // 2
    [0x44, 0x82, 0x92, 0x92, 0x6C], // 3
    [0x30, 0x28, 0x24, 0xFE, 0x20], // 4
    [0x4E, 0x8A, 0x8A, 0x8A, 0x72], // 5
    [0x78, 0x94, 0x92, 0x92, 0x60], // 6
    [0x02, 0xE2, 0x12, 0x0A, 0x06], // 7
    [0x6C, 0x92, 0x92, 0x92, 0x6C], // 8
    [0x0C, 0x92, 0x92, 0x52, 0x3C], // 9
    [0x00, 0x66, 0x66, 0x00, 0x00], // :
    [0x00, 0x46, 0x36, 0x00, 0x00], // ;
    [0x10, 0x28, 0x44, 0x82, 0x00], // <
    [0x28, 0x28, 0x28, 0x28, 0x28], // =
    [0x00, 0x82, 0x44, 0x28, 0x10], // >
    [0x04, 0x02, 0xA2, 0x12, 0x0C], // ?
    [0x64, 0x92, 0xF2, 0x82, 0x7C], // @
    [0xFC, 0x22, 0x22, 0x22, 0xFC], // A
    [0xFE, 0x92, 0x92, 0x92, 0x6C], // B
    [0x7C, 0x82, 0x82, 0x82, 0x44], // C
    [0xFE, 0x82, 0x82, 0x82, 0x7C], // D
    [0xFE, 0x92, 0x92, 0x92, 0x92], // E
    [0xFE, 0x12, 0x12, 0x12, 0x12], // F
    [0x7C, 0x82, 0x92, 0x92, 0x74], // G
    [0xFE, 0x10, 0x10, 0x10, 0xFE], // H
    [0x00, 0x00, 0xFE, 0x00, 0x00], // I
    [0x40, 0x80, 0x82, 0x7E, 0x02], // J
    [0xFE, 0x10, 0x28, 0x44, 0x82], // K
    [0xFE, 0x80, 0x80, 0x80, 0x80], // L
    [0xFE, 0x04, 0x08, 0x04, 0xFE], // M
    [0xFE, 0x04, 0x08, 0x10, 0xFE], // N
    [0x7C, 0x82, 0x82, 0x82, 0x7C], // O
    [0xFE, 0x12, 0x12, 0x12, 0x0C], // P
    [0x7C, 0x82, 0xA2, 0x42, 0xBC], // Q
    [0xFE, 0x12, 0x32, 0x52, 0x8C], // R
    [0x8C, 0x92, 0x92, 0x92, 0x62], // S
    [0x02, 0x02, 0xFE, 0x02, 0x02], // T
    [0x7E, 0x80, 0x80, 0x80, 0x7E], // U
    [0x3E, 0x40, 0x80, 0x40, 0x3E], // V
    [0x7E, 0x80, 0x7E, 0x80, 0x7E], // W
    [0xC6, 0x28, 0x10, 0x28, 0xC6], // X
    [0x0E, 0x10, 0xF0, 0x10, 0x0E], // Y
    [0xC2, 0xA2, 0x92, 0x8A, 0x86], // Z
    [0x00, 0x00, 0xFE, 0x82, 0x00], // [
    [0x04, 0x08, 0x10, 0x20, 0x40], // backslash
    [0x00, 0x82, 0xFE, 0x00, 0x00], // ]
    [0x08, 0x04, 0x02, 0x04, 0x08], // ^
    [0x80, 0x80, 0x80, 0x80, 0x80], // _
    [0x00, 0x00, 0x01, 0x02, 0x04], // `
    [0x40, 0xA8, 0xA8, 0xA8, 0xF0], // a
    [0xFE, 0x88, 0x88, 0x88, 0x70], // b
    [0x70, 0x88, 0x88, 0x88, 0x40], // c
    [0x70, 0x88, 0x88, 0x90, 0xFE], // d
    [0x70, 0xA8, 0xA8, 0xA8, 0x30], // e
    [0x10, 0xFC, 0x12, 0x02, 0x04], // f
    [0x18, 0xA4, 0xA4, 0xA4, 0x7C], // g
    [0xFE, 0x10, 0x08, 0x08, 0xF0], // h
    [0x00, 0x00, 0xFA, 0x00, 0x00], // i
    [0x00, 0x80, 0x7A, 0x00, 0x00], // j
    [0xFE, 0x20, 0x50, 0x88, 0x00], // k
    [0x00, 0xFE, 0x00, 0x00, 0x00], // l
    [0xF8, 0x08, 0x10, 0x08, 0xF0], // m
    [0xF8, 0x10, 0x08, 0x08, 0xF0], // n
    [0x70, 0x88, 0x88, 0x88, 0x70], // o
    [0xF8, 0x28, 0x28, 0x28, 0x10], // p
    [0x10, 0x28, 0x28, 0x30, 0xFC], // q
    [0xF8, 0x10, 0x08, 0x08, 0x10], // r
    [0x90, 0xA8, 0xA8, 0xA8, 0x40], // s
    [0x08, 0x7E, 0x88, 0x80, 0x40], // t
    [0x78, 0x80, 0x80, 0x40, 0xF8], // u
    [0x38, 0x40, 0x80, 0x40, 0x38], // v
    [0x78, 0x80, 0x78, 0x80, 0x78], // w
    [0x88, 0x50, 0x20, 0x50, 0x88], // x
    [0x18, 0xA0, 0xA0, 0xA0, 0x78], // y
    [0x88, 0xC8, 0xA8, 0x98, 0x88], // z
    [0x10, 0x6C, 0x82, 0x00, 0x00], // {
    [0x00, 0x00, 0x7E, 0x00, 0x00], // |
    [0x00, 0x82, 0x6C, 0x10, 0x00], // }
    [0x20, 0x10, 0x10, 0x08, 0x00], // ~
];

/// Look up the glyph for a character code
pub fn glyph(code: u8) -> Result<&'static Glyph, InvalidArgument> {
    if (FIRST_CHAR..=LAST_CHAR).contains(&code) {
        Ok(&FONT_5X8[(code - FIRST_CHAR) as usize])
    } else {
        Err(InvalidArgument::GlyphCode(code as u32))
    }
}

/// Look up the glyph for a `char`, rejecting anything outside printable ASCII
pub fn glyph_for(ch: char) -> Result<&'static Glyph, InvalidArgument> {
    u8::try_from(ch)
        .ok()
        .filter(|code| (FIRST_CHAR..=LAST_CHAR).contains(code))
        .map(|code| &FONT_5X8[(code - FIRST_CHAR) as usize])
        .ok_or(InvalidArgument::GlyphCode(ch as u32))
}

/// Check that every character of `text` has a glyph
pub fn check_text(text: &str) -> Result<(), InvalidArgument> {
    text.chars().try_for_each(|ch| glyph_for(ch).map(|_| ()))
}
