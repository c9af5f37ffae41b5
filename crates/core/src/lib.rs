//! intrusion_alarm_core - Pure no_std security state machine
//!
//! This crate contains the platform-agnostic logic of the intrusion alarm:
//! keypad authentication, intrusion triggering with a cooldown window, and
//! the mapping from trigger decisions to lamp and buzzer commands. It can be
//! tested on host without any hardware.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies outside of tests
//! - **Trait abstractions**: Keypad, ranging sensor, actuators, diagnostics
//!   and time are injected via traits
//! - **Owned state**: One [`SecuritySystemState`] passed by `&mut` into each
//!   controller, no globals
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic traits (TimeSource, KeySource, RangeSensor,
//!   AlarmOutputs, StatusSink) and their mocks
//! - [`keypad`]: Key events and the 4x4 keypad layout
//! - [`config`]: Alarm configuration and validation
//! - [`arming`]: Authentication controller and code buffers
//! - [`alarm`]: Trigger controller, cooldown state and output commands
//! - [`status`]: Diagnostic status events
//! - [`ranging`]: Echo time to distance conversion
//! - [`system`]: Per-cycle orchestration of both controllers

#![no_std]

pub mod alarm;
pub mod arming;
pub mod config;
pub mod error;
pub mod keypad;
pub mod ranging;
pub mod state;
pub mod status;
pub mod system;
pub mod traits;

pub use alarm::{OutputCommand, TriggerController, TriggerState};
pub use arming::{AuthController, AuthOutcome, EnteredCode, ReferenceCode};
pub use config::AlarmConfig;
pub use error::ConfigError;
pub use keypad::Key;
pub use state::SecuritySystemState;
pub use status::StatusEvent;
pub use system::{ControlLoop, CycleReport, SecuritySystem};
