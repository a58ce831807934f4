//! Events that trigger lifecycle transitions

/// Events raised by the init sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// `init` was called
    InitRequested,
    /// Reset pulsed, display switched on and cleared
    InitComplete,
    /// A status wait timed out or the bus failed during init
    InitFailed,
}
