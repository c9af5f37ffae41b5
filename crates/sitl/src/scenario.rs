//! Scenario files
//!
//! A scenario scripts everything the alarm would see on real hardware:
//! keys typed on the keypad and the distance in front of the sensor over
//! time. Example:
//!
//! ```json
//! {
//!   "name": "intruder while armed",
//!   "duration_ms": 90000,
//!   "keys": [{ "at_ms": 100, "keys": "1234#" }],
//!   "distances": [
//!     { "at_ms": 0, "cm": 200 },
//!     { "at_ms": 5000, "cm": 30 },
//!     { "at_ms": 6000, "cm": 200 }
//!   ]
//! }
//! ```
//!
//! A key group is delivered one key per cycle starting at `at_ms`. A
//! distance sample holds until the next one.

use std::fs;
use std::path::Path;

use intrusion_alarm_core::config::{
    COOLDOWN_DURATION_MS, DEFAULT_REFERENCE_CODE, DISTANCE_THRESHOLD_CM,
};
use intrusion_alarm_core::{AlarmConfig, Key};
use serde::{Deserialize, Serialize};

use crate::error::SimulatorError;

/// Firmware polling period (ms)
pub const DEFAULT_CYCLE_MS: u32 = 10;

/// Distance reported before the first sample (cm)
pub const DEFAULT_DISTANCE_CM: u32 = 400;

fn default_cycle_ms() -> u32 {
    DEFAULT_CYCLE_MS
}

/// Overrides for the built-in alarm configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub reference_code: Option<String>,
    #[serde(default)]
    pub distance_threshold_cm: Option<u32>,
    #[serde(default)]
    pub cooldown_duration_ms: Option<u32>,
}

/// Keys typed starting at `at_ms`, one per cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub at_ms: u64,
    pub keys: String,
}

/// Distance in front of the sensor from `at_ms` on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceSample {
    pub at_ms: u64,
    pub cm: u32,
}

/// Scripted simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: ConfigOverrides,
    #[serde(default = "default_cycle_ms")]
    pub cycle_ms: u32,
    /// Simulated run length (ms)
    pub duration_ms: u64,
    /// Uptime when the scenario starts (ms). Times in `keys` and
    /// `distances` are relative to the scenario start.
    #[serde(default)]
    pub boot_offset_ms: u64,
    #[serde(default)]
    pub keys: Vec<KeyPress>,
    #[serde(default)]
    pub distances: Vec<DistanceSample>,
    /// Uniform sensor noise amplitude (cm)
    #[serde(default)]
    pub noise_cm: u32,
    /// RNG seed for the noise. None = random.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Scenario {
    /// Empty scenario with the firmware defaults
    pub fn new(duration_ms: u64) -> Self {
        Self {
            name: String::new(),
            config: ConfigOverrides::default(),
            cycle_ms: DEFAULT_CYCLE_MS,
            duration_ms,
            boot_offset_ms: 0,
            keys: Vec::new(),
            distances: Vec::new(),
            noise_cm: 0,
            seed: None,
        }
    }

    /// Parse and validate a scenario
    pub fn from_json(json: &str) -> Result<Self, SimulatorError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read, parse and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulatorError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Append a key group
    pub fn type_keys(mut self, at_ms: u64, keys: &str) -> Self {
        self.keys.push(KeyPress {
            at_ms,
            keys: keys.to_string(),
        });
        self
    }

    /// Append a distance sample
    pub fn distance(mut self, at_ms: u64, cm: u32) -> Self {
        self.distances.push(DistanceSample { at_ms, cm });
        self
    }

    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.cycle_ms == 0 {
            return Err(SimulatorError::InvalidScenario("cycle_ms must be positive"));
        }
        for press in &self.keys {
            if let Some(c) = press.keys.chars().find(|&c| Key::from_char(c).is_none()) {
                return Err(SimulatorError::InvalidKey(c));
            }
        }
        self.alarm_config()?;
        Ok(())
    }

    /// Firmware defaults with this scenario's overrides applied
    pub fn alarm_config(&self) -> Result<AlarmConfig, SimulatorError> {
        let config = AlarmConfig::new(
            self.config
                .reference_code
                .as_deref()
                .unwrap_or(DEFAULT_REFERENCE_CODE),
            self.config
                .distance_threshold_cm
                .unwrap_or(DISTANCE_THRESHOLD_CM),
            self.config
                .cooldown_duration_ms
                .unwrap_or(COOLDOWN_DURATION_MS),
        )?;
        Ok(config)
    }
}
