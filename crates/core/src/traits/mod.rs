//! Core traits for platform-agnostic alarm functionality.
//!
//! This module provides trait abstractions that decouple the security state
//! machine from keypad scanning, sensor timing and actuator hardware.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations (embedded-hal drivers, Embassy) live in the
//!   firmware crate

pub mod io;
pub mod time;

pub use io::{
    AlarmOutputs, KeySource, MockKeypad, MockOutputs, MockRangeSensor, MockStatusSink,
    RangeSensor, StatusSink,
};
pub use time::{MockTime, TimeSource};
