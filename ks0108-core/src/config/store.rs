//! Binary persistence for [`DisplayConfig`]
//!
//! Configuration is stored as postcard-serialized bytes so boards can keep
//! tuned timing in flash next to their other settings.

use heapless::Vec;

use super::types::DisplayConfig;

/// Upper bound on the encoded size of a [`DisplayConfig`]
pub const MAX_ENCODED_LEN: usize = 48;

/// Configuration (de)serialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Encoding failed or exceeded [`MAX_ENCODED_LEN`]
    Serialize,
    /// Bytes are not a valid configuration
    Deserialize,
    /// Stored configuration has a different version
    VersionMismatch { found: u8, expected: u8 },
}

/// Encode a configuration
pub fn encode(config: &DisplayConfig) -> Result<Vec<u8, MAX_ENCODED_LEN>, StoreError> {
    let mut buf = [0u8; MAX_ENCODED_LEN];
    let used = postcard::to_slice(config, &mut buf).map_err(|_| StoreError::Serialize)?;
    Vec::from_slice(used).map_err(|_| StoreError::Serialize)
}

/// Decode a configuration, checking its version against the defaults
pub fn decode(bytes: &[u8]) -> Result<DisplayConfig, StoreError> {
    let config: DisplayConfig = postcard::from_bytes(bytes).map_err(|_| StoreError::Deserialize)?;
    let expected = DisplayConfig::default().version;
    if config.version != expected {
        return Err(StoreError::VersionMismatch {
            found: config.version,
            expected,
        });
    }
    Ok(config)
}
