//! Arming system types and logic
//!
//! This module translates keypad events into arm/disarm transitions and
//! maintains the entered-code buffer. Keypad scanning lives in the firmware
//! crate.

pub mod auth;
pub mod code;

pub use auth::{AuthController, AuthOutcome};
pub use code::{EnteredCode, ReferenceCode, MAX_CODE_LENGTH};
