//! Configuration types
//!
//! Board-agnostic display settings, optionally stored as postcard binary data.

#[cfg(feature = "serde")]
pub mod store;
pub mod types;

pub use types::*;
