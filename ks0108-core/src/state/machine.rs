//! State machine definition

use super::events::Event;

/// Display lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed, controllers untouched
    #[default]
    Uninitialized,
    /// Init sequence in progress
    Resetting,
    /// Display on and cleared; drawing allowed
    Ready,
}

impl State {
    /// Check if drawing and positioning operations are allowed
    pub fn is_ready(&self) -> bool {
        matches!(self, State::Ready)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Re-init is allowed from any state
            (_, InitRequested) => Resetting,

            (Resetting, InitComplete) => Ready,
            (Resetting, InitFailed) => Uninitialized,

            // Default: stay in current state
            _ => self,
        }
    }
}
