#![cfg_attr(not(test), no_std)]

//! intrusion_alarm_firmware - Embassy firmware for the intrusion alarm
//!
//! This crate provides the hardware shims around the pure state machine in
//! `intrusion_alarm_core`: keypad matrix scanning, ultrasonic ranging, lamp
//! and buzzer actuators, and logging.
//!
//! # Design Principles
//!
//! - **embedded-hal drivers**: Devices are generic over `embedded-hal` 1.0
//!   pin, PWM and delay traits, so they run against mocks on host
//! - **Platform implementations**: Embassy TimeSource and the control task
//!   are only compiled with the `pico2_w` feature
//! - **Infallible core seams**: Driver errors are logged here and never reach
//!   the state machine

// Platform abstraction layer (time source, driver errors)
pub mod platform;

// Device drivers (keypad, ultrasonic ranger, lamp, buzzer)
pub mod devices;

// Logging macros and status routing
pub mod core;

// Embassy control task
#[cfg(feature = "pico2_w")]
pub mod control;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!, log_trace!)
// are exported at crate root via #[macro_export] in core::logging
