//! Core firmware infrastructure
//!
//! Logging macros and the diagnostic channel implementation. The security
//! state machine itself lives in `intrusion_alarm_core`.

pub mod logging;
pub mod status;
