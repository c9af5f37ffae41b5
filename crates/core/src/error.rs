//! Configuration Error Types
//!
//! The state machine itself never fails: every key event and distance sample
//! is accepted. Errors only exist at startup, when a configuration that could
//! never be satisfied is rejected.

use core::fmt;

/// Errors reported when validating an [`AlarmConfig`](crate::config::AlarmConfig)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Code length of zero
    EmptyCode,
    /// Code length above the buffer capacity
    CodeTooLong {
        /// Requested length
        length: usize,
        /// Maximum supported length
        max: usize,
    },
    /// Reference code length differs from the configured code length
    CodeLengthMismatch {
        /// Configured code length
        expected: usize,
        /// Length of the reference code
        actual: usize,
    },
    /// Reference code contains a character that cannot be typed as a code symbol
    InvalidCodeCharacter(char),
    /// Distance threshold of zero never triggers
    ZeroThreshold,
    /// Cooldown of zero disables re-trigger suppression
    ZeroCooldown,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCode => write!(f, "Code length must be at least 1"),
            ConfigError::CodeTooLong { length, max } => {
                write!(f, "Code length {} exceeds maximum of {}", length, max)
            }
            ConfigError::CodeLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Reference code has {} characters, expected {}",
                    actual, expected
                )
            }
            ConfigError::InvalidCodeCharacter(c) => {
                write!(f, "Reference code contains invalid character '{}'", c)
            }
            ConfigError::ZeroThreshold => write!(f, "Distance threshold must be above 0 cm"),
            ConfigError::ZeroCooldown => write!(f, "Cooldown duration must be above 0 ms"),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            format!("{}", ConfigError::CodeLengthMismatch { expected: 4, actual: 3 }),
            "Reference code has 3 characters, expected 4"
        );
        assert_eq!(
            format!("{}", ConfigError::InvalidCodeCharacter('#')),
            "Reference code contains invalid character '#'"
        );
        assert_eq!(
            format!("{}", ConfigError::CodeTooLong { length: 12, max: 8 }),
            "Code length 12 exceeds maximum of 8"
        );
    }
}
