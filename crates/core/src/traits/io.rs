//! Device traits seen by the security state machine
//!
//! The core never touches pins. It consumes key events and distance samples
//! and produces actuator commands and status events through these traits.
//! Mock implementations below record everything for test verification.

use heapless::{Deque, Vec};

use crate::keypad::Key;
use crate::status::StatusEvent;

/// Producer of discrete key events.
///
/// Debouncing and matrix scanning are the implementor's concern. Each
/// physical press is reported at most once.
pub trait KeySource {
    /// Return the key pressed since the last poll, if any
    fn poll(&mut self) -> Option<Key>;
}

/// Producer of distance samples.
///
/// Any value is a legitimate reading, including 0 and implausibly large
/// values produced by echo timeouts.
pub trait RangeSensor {
    /// Take one sample (cm)
    fn measure(&mut self) -> u32;
}

/// Lamp and buzzer sinks.
///
/// Commands are on/off only; the buzzer tone is fixed by the implementor.
pub trait AlarmOutputs {
    fn set_lamp(&mut self, on: bool);
    fn set_buzzer(&mut self, on: bool);
}

/// Fire-and-forget diagnostic channel
pub trait StatusSink {
    fn notify(&mut self, event: StatusEvent);
}

/// Discards every event
impl StatusSink for () {
    fn notify(&mut self, _event: StatusEvent) {}
}

// ============================================================================
// Mock Implementations (always available for testing)
// ============================================================================

/// Capacity of mock scripts and recordings
pub const MOCK_CAPACITY: usize = 64;

/// Scripted keypad. Each poll consumes one entry; an exhausted script reads
/// as "no key".
#[derive(Debug, Default)]
pub struct MockKeypad {
    script: Deque<Option<Key>, MOCK_CAPACITY>,
}

impl MockKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key (or `None` for an idle cycle). Dropped when the script is full.
    pub fn push(&mut self, key: Option<Key>) {
        let _ = self.script.push_back(key);
    }

    /// Queue every character of `keys` as consecutive presses.
    ///
    /// Characters that are not on the keypad are skipped.
    pub fn type_str(&mut self, keys: &str) {
        for c in keys.chars() {
            if let Some(key) = Key::from_char(c) {
                self.push(Some(key));
            }
        }
    }

    /// Entries not yet polled
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl KeySource for MockKeypad {
    fn poll(&mut self) -> Option<Key> {
        self.script.pop_front().flatten()
    }
}

/// Scripted ranging sensor. Once the script runs out the last sample repeats.
#[derive(Debug)]
pub struct MockRangeSensor {
    script: Deque<u32, MOCK_CAPACITY>,
    last_cm: u32,
}

impl MockRangeSensor {
    /// Create a sensor that reads `initial_cm` until samples are queued
    pub fn new(initial_cm: u32) -> Self {
        Self {
            script: Deque::new(),
            last_cm: initial_cm,
        }
    }

    /// Queue a sample. Dropped when the script is full.
    pub fn push(&mut self, distance_cm: u32) {
        let _ = self.script.push_back(distance_cm);
    }
}

impl RangeSensor for MockRangeSensor {
    fn measure(&mut self) -> u32 {
        if let Some(cm) = self.script.pop_front() {
            self.last_cm = cm;
        }
        self.last_cm
    }
}

/// Records actuator state and how many commands each actuator received
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MockOutputs {
    pub lamp: bool,
    pub buzzer: bool,
    pub lamp_commands: usize,
    pub buzzer_commands: usize,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlarmOutputs for MockOutputs {
    fn set_lamp(&mut self, on: bool) {
        self.lamp = on;
        self.lamp_commands += 1;
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer = on;
        self.buzzer_commands += 1;
    }
}

/// Records status events, dropping them once full
#[derive(Debug, Default)]
pub struct MockStatusSink {
    pub events: Vec<StatusEvent, MOCK_CAPACITY>,
}

impl MockStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `event` was recorded
    pub fn contains(&self, event: &StatusEvent) -> bool {
        self.events.contains(event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl StatusSink for MockStatusSink {
    fn notify(&mut self, event: StatusEvent) {
        let _ = self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_keypad_script() {
        let mut keypad = MockKeypad::new();
        keypad.type_str("12#");
        keypad.push(None);
        keypad.push(Some(Key::Reset));

        assert_eq!(keypad.poll(), Some(Key::Symbol('1')));
        assert_eq!(keypad.poll(), Some(Key::Symbol('2')));
        assert_eq!(keypad.poll(), Some(Key::Confirm));
        assert_eq!(keypad.poll(), None);
        assert_eq!(keypad.poll(), Some(Key::Reset));
        assert_eq!(keypad.poll(), None);
        assert_eq!(keypad.remaining(), 0);
    }

    #[test]
    fn test_mock_range_sensor_repeats_last() {
        let mut sensor = MockRangeSensor::new(200);
        assert_eq!(sensor.measure(), 200);

        sensor.push(80);
        sensor.push(30);
        assert_eq!(sensor.measure(), 80);
        assert_eq!(sensor.measure(), 30);
        assert_eq!(sensor.measure(), 30);
    }

    #[test]
    fn test_mock_outputs_counts_commands() {
        let mut outputs = MockOutputs::new();
        outputs.set_lamp(true);
        outputs.set_lamp(true);
        outputs.set_buzzer(false);

        assert!(outputs.lamp);
        assert!(!outputs.buzzer);
        assert_eq!(outputs.lamp_commands, 2);
        assert_eq!(outputs.buzzer_commands, 1);
    }

    #[test]
    fn test_mock_status_sink_records() {
        let mut sink = MockStatusSink::new();
        sink.notify(StatusEvent::Armed);
        assert!(sink.contains(&StatusEvent::Armed));
        assert!(!sink.contains(&StatusEvent::Disarmed));
        sink.clear();
        assert!(sink.events.is_empty());
    }
}
