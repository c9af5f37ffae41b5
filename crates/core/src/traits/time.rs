//! Time abstraction traits for platform-agnostic timing operations.
//!
//! This module provides the `TimeSource` trait that abstracts over different
//! time providers (Embassy, simulator clock, mock) so that the cooldown logic
//! can be tested on host without embedded dependencies.

use core::cell::Cell;

/// Platform-agnostic monotonic time source.
///
/// `now_ms` behaves like a free-running 32-bit millisecond counter: it wraps
/// to zero after `u32::MAX` milliseconds (about 49.7 days). Consumers compare
/// timestamps with `wrapping_sub`, which stays correct across the wrap as long
/// as the measured interval is shorter than the counter period.
///
/// # Example
///
/// ```
/// use intrusion_alarm_core::traits::{MockTime, TimeSource};
///
/// fn expired<T: TimeSource>(time: &T, start_ms: u32, window_ms: u32) -> bool {
///     time.now_ms().wrapping_sub(start_ms) >= window_ms
/// }
///
/// let time = MockTime::new();
/// assert!(!expired(&time, 0, 1000));
/// time.advance_ms(1000);
/// assert!(expired(&time, 0, 1000));
/// ```
pub trait TimeSource {
    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns current time in milliseconds since system start, truncated to
    /// a wrapping 32-bit counter.
    fn now_ms(&self) -> u32 {
        (self.now_us() / 1000) as u32
    }

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle a reference in the future.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }

    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source for testing with controllable time advancement.
///
/// Time only moves when the test says so, which makes cooldown expiry fully
/// deterministic.
///
/// # Example
///
/// ```
/// use intrusion_alarm_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// assert_eq!(time.now_us(), 0);
///
/// time.advance(1000); // Advance 1ms
/// assert_eq!(time.now_us(), 1000);
/// assert_eq!(time.now_ms(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount of microseconds.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }

    /// Advances the current time by the specified amount of milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(ms * 1000);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_initial_value() {
        let time = MockTime::new();
        assert_eq!(time.now_us(), 0);
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn mock_time_with_initial() {
        let time = MockTime::with_initial(5_000_000);
        assert_eq!(time.now_us(), 5_000_000);
        assert_eq!(time.now_ms(), 5000);
    }

    #[test]
    fn mock_time_advance() {
        let time = MockTime::new();
        time.advance(500_000);
        assert_eq!(time.now_us(), 500_000);

        time.advance_ms(500);
        assert_eq!(time.now_us(), 1_000_000);
        assert_eq!(time.now_ms(), 1000);
    }

    #[test]
    fn mock_time_elapsed_since_saturates() {
        let time = MockTime::new();
        time.set(1_000);

        // Reference is in the "future" - should saturate to 0
        assert_eq!(time.elapsed_since(5_000), 0);
        assert_eq!(time.elapsed_since(400), 600);
    }

    #[test]
    fn now_ms_wraps_like_32bit_counter() {
        let wrap_us = (u32::MAX as u64 + 1) * 1000;
        let time = MockTime::with_initial(wrap_us - 5_000);
        let before = time.now_ms();
        assert_eq!(before, u32::MAX - 4);

        time.advance_ms(10);
        let after = time.now_ms();
        assert_eq!(after, 5);
        assert_eq!(after.wrapping_sub(before), 10);
    }

    #[test]
    fn reference_forwards_to_source() {
        let time = MockTime::with_initial(42_000);
        let by_ref = &time;
        assert_eq!(by_ref.now_ms(), 42);
        time.advance_ms(1);
        assert_eq!(by_ref.now_ms(), 43);
    }
}
