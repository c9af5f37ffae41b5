//! Platform error types
//!
//! This module defines error types for driver operations. HAL-specific pin
//! and PWM errors are mapped to these variants by the device drivers.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum PlatformError {
    /// GPIO operation failed
    Gpio(GpioError),
    /// PWM operation failed
    Pwm(PwmError),
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum GpioError {
    /// Driving an output pin failed
    WriteFailed,
    /// Reading an input pin failed
    ReadFailed,
}

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum PwmError {
    /// Setting the duty cycle failed
    DutyCycleFailed,
    /// Tone frequency cannot be produced with the given clock and divider
    InvalidFrequency,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Pwm(e) => write!(f, "PWM error: {:?}", e),
        }
    }
}

impl From<GpioError> for PlatformError {
    fn from(error: GpioError) -> Self {
        PlatformError::Gpio(error)
    }
}

impl From<PwmError> for PlatformError {
    fn from(error: PwmError) -> Self {
        PlatformError::Pwm(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", PlatformError::Gpio(GpioError::ReadFailed)),
            "GPIO error: ReadFailed"
        );
        assert_eq!(
            format!("{}", PlatformError::from(PwmError::InvalidFrequency)),
            "PWM error: InvalidFrequency"
        );
    }
}
