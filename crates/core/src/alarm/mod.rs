//! Intrusion alarm
//!
//! Trigger state machine with its embedded cooldown timer, and the mapping
//! from trigger decisions to lamp/buzzer commands.

pub mod output;
pub mod trigger;

pub use output::OutputCommand;
pub use trigger::{TriggerController, TriggerState};
