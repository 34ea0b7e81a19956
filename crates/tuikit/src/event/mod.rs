//! Decoded key events and the result of handing one to a widget

mod key;

pub use key::{Key, KeyType, Modifiers};

/// Result of feeding a key to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The key was used
    Consumed,
    /// The key meant nothing here
    Ignored,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
