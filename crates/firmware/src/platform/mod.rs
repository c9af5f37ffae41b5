//! Platform abstraction layer
//!
//! Driver error types and the Embassy time source. All RP2350-specific code
//! is gated behind the `pico2_w` feature.

pub mod error;

#[cfg(feature = "pico2_w")]
pub mod time;

pub use error::{GpioError, PlatformError, PwmError, Result};

#[cfg(feature = "pico2_w")]
pub use time::EmbassyTime;
