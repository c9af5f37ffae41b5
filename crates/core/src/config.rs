//! Alarm configuration
//!
//! Startup constants of the controller, gathered in one structure so their
//! numeric meaning is explicit and testable independent of the polling rate.
//! None of these values change at runtime.
//!
//! # Defaults
//!
//! | Field                   | Default  |
//! |-------------------------|----------|
//! | `reference_code`        | `"1234"` |
//! | `code_length`           | 4        |
//! | `distance_threshold_cm` | 50       |
//! | `cooldown_duration_ms`  | 60000    |

use crate::arming::code::{ReferenceCode, MAX_CODE_LENGTH};
use crate::error::ConfigError;

/// Default reference code
pub const DEFAULT_REFERENCE_CODE: &str = "1234";

/// Default number of symbols in a code
pub const CODE_LENGTH: usize = 4;

/// Samples strictly below this distance trigger the alarm (cm)
pub const DISTANCE_THRESHOLD_CM: u32 = 50;

/// Trigger suppression window after an alarm (ms).
///
/// Sixty seconds. Earlier firmware documented this window as six seconds
/// while using this value; the value is authoritative.
pub const COOLDOWN_DURATION_MS: u32 = 60_000;

/// Alarm configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmConfig {
    /// Code that arms and disarms the system
    pub reference_code: ReferenceCode,
    /// Number of symbols the entered-code buffer accepts
    pub code_length: usize,
    /// Samples strictly below this distance trigger the alarm (cm)
    pub distance_threshold_cm: u32,
    /// Trigger suppression window after an alarm (ms)
    pub cooldown_duration_ms: u32,
}

impl AlarmConfig {
    /// Build and validate a configuration.
    ///
    /// The code length is taken from `reference_code`.
    ///
    /// # Arguments
    ///
    /// * `reference_code` - Printed form of the code, e.g. `"1234"`
    /// * `distance_threshold_cm` - Trigger distance (cm)
    /// * `cooldown_duration_ms` - Suppression window after a trigger (ms)
    pub fn new(
        reference_code: &str,
        distance_threshold_cm: u32,
        cooldown_duration_ms: u32,
    ) -> Result<Self, ConfigError> {
        let reference_code = ReferenceCode::parse(reference_code)?;
        let config = Self {
            code_length: reference_code.len(),
            reference_code,
            distance_threshold_cm,
            cooldown_duration_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be satisfied.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 {
            return Err(ConfigError::EmptyCode);
        }
        if self.code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::CodeTooLong {
                length: self.code_length,
                max: MAX_CODE_LENGTH,
            });
        }
        if self.reference_code.len() != self.code_length {
            return Err(ConfigError::CodeLengthMismatch {
                expected: self.code_length,
                actual: self.reference_code.len(),
            });
        }
        if self.distance_threshold_cm == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.cooldown_duration_ms == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        Ok(())
    }
}

impl Default for AlarmConfig {
    fn default() -> Self {
        // DEFAULT_REFERENCE_CODE is four ASCII digits
        let reference_code = match ReferenceCode::parse(DEFAULT_REFERENCE_CODE) {
            Ok(code) => code,
            Err(_) => unreachable!(),
        };
        Self {
            reference_code,
            code_length: CODE_LENGTH,
            distance_threshold_cm: DISTANCE_THRESHOLD_CM,
            cooldown_duration_ms: COOLDOWN_DURATION_MS,
        }
    }
}
