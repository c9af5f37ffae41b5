//! Embassy-based time source implementation.
//!
//! This module provides the `EmbassyTime` implementation of the
//! `TimeSource` trait using Embassy's time driver.

use intrusion_alarm_core::traits::TimeSource;

/// Embassy-based time source using the Embassy time driver.
///
/// `now_ms` is the low 32 bits of the Embassy millisecond count, which wraps
/// like a classic `millis()` counter.
///
/// # Example
///
/// ```ignore
/// use intrusion_alarm_firmware::platform::EmbassyTime;
/// use intrusion_alarm_core::traits::TimeSource;
///
/// let time = EmbassyTime;
/// let now = time.now_ms();
/// ```
#[derive(Clone, Copy, Default)]
pub struct EmbassyTime;

impl TimeSource for EmbassyTime {
    fn now_us(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }

    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
