//! Display lifecycle state machine
//!
//! The panel must see a power-up wait, a reset pulse and a display-on
//! instruction before any drawing. Drawing operations check the state and
//! fail fast instead of writing to an unconfigured controller.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
