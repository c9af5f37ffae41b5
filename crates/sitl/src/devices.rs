//! Simulated keypad, ranging sensor and actuators
//!
//! All three read the shared [`SimClock`] so that scripted inputs line up
//! with the time the state machine sees.

use std::collections::VecDeque;

use intrusion_alarm_core::traits::{AlarmOutputs, KeySource, RangeSensor, TimeSource};
use intrusion_alarm_core::Key;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scenario::{DistanceSample, KeyPress, DEFAULT_DISTANCE_CM};
use crate::time::SimClock;

/// Keypad replaying scheduled key presses.
///
/// At most one key is delivered per poll. Keys that come due while earlier
/// ones are still queued wait their turn, like a typist who is not faster
/// than the scan loop.
#[derive(Debug)]
pub struct SimKeypad {
    clock: SimClock,
    pending: VecDeque<(u64, Key)>,
}

impl SimKeypad {
    pub fn new(clock: SimClock, presses: &[KeyPress]) -> Self {
        let mut scheduled: Vec<(u64, Key)> = presses
            .iter()
            .flat_map(|press| {
                press
                    .keys
                    .chars()
                    .filter_map(Key::from_char)
                    .map(move |key| (press.at_ms, key))
            })
            .collect();
        // Stable: keys of one group keep their order
        scheduled.sort_by_key(|&(at_ms, _)| at_ms);
        Self {
            clock,
            pending: scheduled.into(),
        }
    }

    /// Keys not delivered yet
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl KeySource for SimKeypad {
    fn poll(&mut self) -> Option<Key> {
        let now = self.clock.elapsed_ms();
        match self.pending.front() {
            Some(&(at_ms, _)) if at_ms <= now => self.pending.pop_front().map(|(_, key)| key),
            _ => None,
        }
    }
}

/// Ranging sensor following a distance timeline
#[derive(Debug)]
pub struct SimRangeSensor {
    clock: SimClock,
    timeline: Vec<DistanceSample>,
    noise_cm: u32,
    rng: StdRng,
}

impl SimRangeSensor {
    pub fn new(clock: SimClock, samples: &[DistanceSample]) -> Self {
        let mut timeline = samples.to_vec();
        timeline.sort_by_key(|sample| sample.at_ms);
        Self {
            clock,
            timeline,
            noise_cm: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Add uniform noise of up to `noise_cm` in either direction
    pub fn with_noise(mut self, noise_cm: u32, seed: Option<u64>) -> Self {
        self.noise_cm = noise_cm;
        self.rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self
    }

    /// Noise-free distance at `at_ms`
    pub fn distance_at(&self, at_ms: u64) -> u32 {
        self.timeline
            .iter()
            .take_while(|sample| sample.at_ms <= at_ms)
            .last()
            .map_or(DEFAULT_DISTANCE_CM, |sample| sample.cm)
    }
}

impl RangeSensor for SimRangeSensor {
    fn measure(&mut self) -> u32 {
        let distance = self.distance_at(self.clock.elapsed_ms());
        if self.noise_cm == 0 {
            return distance;
        }
        let noise = self.noise_cm as i64;
        let offset = self.rng.gen_range(-noise..=noise);
        (distance as i64 + offset).clamp(0, u32::MAX as i64) as u32
    }
}

/// Actuator level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputChange {
    /// Scenario time of the change (ms)
    pub at_ms: u64,
    pub lamp: bool,
    pub buzzer: bool,
}

/// Lamp and buzzer recording every level change
#[derive(Debug)]
pub struct SimOutputs {
    clock: SimClock,
    lamp: bool,
    buzzer: bool,
    /// Buzzer on-commands received
    pub buzzer_activations: usize,
    changes: Vec<OutputChange>,
}

impl SimOutputs {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            lamp: false,
            buzzer: false,
            buzzer_activations: 0,
            changes: Vec::new(),
        }
    }

    pub fn lamp(&self) -> bool {
        self.lamp
    }

    pub fn buzzer(&self) -> bool {
        self.buzzer
    }

    pub fn changes(&self) -> &[OutputChange] {
        &self.changes
    }

    fn record(&mut self, lamp: bool, buzzer: bool) {
        if lamp == self.lamp && buzzer == self.buzzer {
            return;
        }
        self.lamp = lamp;
        self.buzzer = buzzer;
        self.changes.push(OutputChange {
            at_ms: self.clock.elapsed_ms(),
            lamp,
            buzzer,
        });
        tracing::debug!(lamp, buzzer, "outputs changed");
    }
}

impl AlarmOutputs for SimOutputs {
    fn set_lamp(&mut self, on: bool) {
        self.record(on, self.buzzer);
    }

    fn set_buzzer(&mut self, on: bool) {
        if on {
            self.buzzer_activations += 1;
            tracing::info!("Buzzer activated");
        }
        self.record(self.lamp, on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_delivers_one_key_per_poll() {
        let clock = SimClock::new();
        let presses = [KeyPress {
            at_ms: 20,
            keys: "12#".to_string(),
        }];
        let mut keypad = SimKeypad::new(clock.clone(), &presses);

        assert_eq!(keypad.poll(), None);
        clock.advance_ms(20);
        assert_eq!(keypad.poll(), Some(Key::Symbol('1')));
        assert_eq!(keypad.poll(), Some(Key::Symbol('2')));
        assert_eq!(keypad.poll(), Some(Key::Confirm));
        assert_eq!(keypad.poll(), None);
        assert_eq!(keypad.remaining(), 0);
    }

    #[test]
    fn test_keypad_orders_groups_by_time() {
        let clock = SimClock::new();
        let presses = [
            KeyPress {
                at_ms: 50,
                keys: "#".to_string(),
            },
            KeyPress {
                at_ms: 0,
                keys: "*".to_string(),
            },
        ];
        let mut keypad = SimKeypad::new(clock.clone(), &presses);
        clock.advance_ms(50);
        assert_eq!(keypad.poll(), Some(Key::Reset));
        assert_eq!(keypad.poll(), Some(Key::Confirm));
    }

    #[test]
    fn test_sensor_holds_last_sample() {
        let clock = SimClock::new();
        let samples = [
            DistanceSample { at_ms: 100, cm: 30 },
            DistanceSample { at_ms: 10, cm: 80 },
        ];
        let mut sensor = SimRangeSensor::new(clock.clone(), &samples);

        assert_eq!(sensor.measure(), DEFAULT_DISTANCE_CM);
        clock.advance_ms(10);
        assert_eq!(sensor.measure(), 80);
        clock.advance_ms(89);
        assert_eq!(sensor.measure(), 80);
        clock.advance_ms(1);
        assert_eq!(sensor.measure(), 30);
    }

    #[test]
    fn test_sensor_noise_is_bounded_and_seeded() {
        let clock = SimClock::new();
        let samples = [DistanceSample { at_ms: 0, cm: 100 }];
        let mut a = SimRangeSensor::new(clock.clone(), &samples).with_noise(5, Some(7));
        let mut b = SimRangeSensor::new(clock.clone(), &samples).with_noise(5, Some(7));

        for _ in 0..100 {
            let reading = a.measure();
            assert!((95..=105).contains(&reading));
            assert_eq!(reading, b.measure());
        }
    }

    #[test]
    fn test_outputs_record_changes_only() {
        let clock = SimClock::new();
        let mut outputs = SimOutputs::new(clock.clone());

        outputs.set_lamp(false);
        outputs.set_buzzer(false);
        assert!(outputs.changes().is_empty());

        clock.advance_ms(30);
        outputs.set_lamp(true);
        outputs.set_buzzer(true);
        outputs.set_lamp(true);

        assert_eq!(
            outputs.changes(),
            &[
                OutputChange {
                    at_ms: 30,
                    lamp: true,
                    buzzer: false
                },
                OutputChange {
                    at_ms: 30,
                    lamp: true,
                    buzzer: true
                },
            ]
        );
        assert_eq!(outputs.buzzer_activations, 1);
    }
}
