//! Ultrasonic echo conversion
//!
//! Sound travels roughly 29 µs per centimeter; the echo covers the distance
//! twice.

/// Microseconds of sound travel per centimeter
pub const US_PER_CM: u32 = 29;

/// Convert an echo round-trip time to a distance in whole centimeters.
///
/// Truncates. An echo of 0 µs (timeout) converts to 0 cm.
pub fn echo_us_to_cm(echo_us: u32) -> u32 {
    echo_us / US_PER_CM / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_conversion() {
        assert_eq!(echo_us_to_cm(0), 0);
        assert_eq!(echo_us_to_cm(57), 0);
        assert_eq!(echo_us_to_cm(58), 1);
        assert_eq!(echo_us_to_cm(1740), 30);
        assert_eq!(echo_us_to_cm(2900), 50);
        assert_eq!(echo_us_to_cm(2899), 49);
    }

    #[test]
    fn test_large_echo_does_not_overflow() {
        assert_eq!(echo_us_to_cm(u32::MAX), u32::MAX / 29 / 2);
    }
}
