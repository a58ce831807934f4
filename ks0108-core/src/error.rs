//! Error types
//!
//! Argument validation always happens before the first bus transfer, so an
//! `InvalidArgument` never leaves the shadow framebuffer or cursor modified.

/// Errors returned by display operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An argument was outside its valid range
    InvalidArgument(InvalidArgument),
    /// Controller status never cleared BUSY/RESET within the poll limit
    HardwareTimeout,
    /// Operation attempted before `init` completed
    NotInitialized,
    /// The bus adapter reported a failure
    Bus,
}

/// Which argument was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// Controller selector outside 0..=2
    Side(u8),
    /// Page outside 0..=7
    Page(u8),
    /// Column outside 0..=63
    Column(u8),
    /// Display start line outside 0..=63
    StartLine(u8),
    /// Pixel coordinate outside 128x64
    Coordinate { x: u8, y: u8 },
    /// Character code without a glyph (outside 32..=126)
    GlyphCode(u32),
    /// Position or justify mode outside 0..=3
    Justify(u8),
    /// Justified text longer than one display line
    TextLength(usize),
    /// Image buffer not exactly 1024 bytes
    ImageSize(usize),
}

impl From<InvalidArgument> for Error {
    fn from(arg: InvalidArgument) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!("ks0108: rejected argument {}", arg);

        Error::InvalidArgument(arg)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;
