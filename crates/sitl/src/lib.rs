//! Host simulator for the intrusion alarm.
//!
//! Runs the `intrusion_alarm_core` state machine against scripted keypad
//! input and distance timelines, on a simulated clock.

pub mod devices;
pub mod error;
pub mod runner;
pub mod scenario;
pub mod sink;
pub mod time;

pub use devices::{OutputChange, SimKeypad, SimOutputs, SimRangeSensor};
pub use error::SimulatorError;
pub use runner::{ScenarioRunner, Timeline};
pub use scenario::{ConfigOverrides, DistanceSample, KeyPress, Scenario};
pub use sink::{TimedEvent, TracingStatusSink};
pub use time::{SimClock, TimeMode};
