//! Device drivers
//!
//! Drivers are generic over `embedded-hal` 1.0 traits and implement the
//! device traits of `intrusion_alarm_core`:
//!
//! - [`keypad`]: 4x4 matrix keypad → `KeySource`
//! - [`ranging`]: HC-SR04 style ultrasonic ranger → `RangeSensor`
//! - [`outputs`]: lamp and piezo buzzer → `AlarmOutputs`

pub mod keypad;
pub mod outputs;
pub mod ranging;

pub use keypad::MatrixKeypad;
pub use outputs::{AlarmActuators, Lamp, PiezoBuzzer};
pub use ranging::UltrasonicRanger;
