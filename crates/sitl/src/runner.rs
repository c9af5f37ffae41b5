//! Scenario runner
//!
//! Wires the core control loop to simulated devices and steps it on a
//! simulated clock. Each step runs one cycle at the current time, then
//! advances the clock by the scenario's cycle period.

use std::fmt;
use std::time::Duration;

use intrusion_alarm_core::{ControlLoop, CycleReport, SecuritySystem, StatusEvent, TriggerState};

use crate::devices::{OutputChange, SimKeypad, SimOutputs, SimRangeSensor};
use crate::error::SimulatorError;
use crate::scenario::Scenario;
use crate::sink::{TimedEvent, TracingStatusSink};
use crate::time::{SimClock, TimeMode};

type SimControlLoop =
    ControlLoop<SimClock, SimKeypad, SimRangeSensor, SimOutputs, TracingStatusSink>;

/// Outcome of a scenario run
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub name: String,
    /// Cycles executed
    pub cycles: u64,
    pub events: Vec<TimedEvent>,
    pub outputs: Vec<OutputChange>,
    pub buzzer_activations: usize,
    pub final_armed: bool,
    pub final_trigger: TriggerState,
}

impl Timeline {
    /// Times at which the alarm went off
    pub fn alarm_times(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter(|timed| matches!(timed.event, StatusEvent::AlarmTriggered { .. }))
            .map(|timed| timed.at_ms)
            .collect()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            writeln!(f, "Scenario: {}", self.name)?;
        }
        writeln!(f, "Cycles:   {}", self.cycles)?;
        writeln!(f, "Events:")?;
        for timed in &self.events {
            writeln!(f, "  {:>10} ms  {}", timed.at_ms, timed.event)?;
        }
        writeln!(f, "Outputs:")?;
        for change in &self.outputs {
            writeln!(
                f,
                "  {:>10} ms  lamp {:<3}  buzzer {}",
                change.at_ms,
                if change.lamp { "on" } else { "off" },
                if change.buzzer { "on" } else { "off" }
            )?;
        }
        write!(
            f,
            "Final:    {} ({:?})",
            if self.final_armed { "armed" } else { "disarmed" },
            self.final_trigger
        )
    }
}

/// Runs one scenario against the core state machine
pub struct ScenarioRunner {
    name: String,
    clock: SimClock,
    control: SimControlLoop,
    cycle_ms: u32,
    end_ms: u64,
    cycles: u64,
}

impl ScenarioRunner {
    pub fn new(scenario: &Scenario) -> Result<Self, SimulatorError> {
        scenario.validate()?;
        let config = scenario.alarm_config()?;

        let clock = SimClock::with_boot_offset_ms(scenario.boot_offset_ms);
        let system = SecuritySystem::new(config, clock.clone())?;
        let keypad = SimKeypad::new(clock.clone(), &scenario.keys);
        let sensor = SimRangeSensor::new(clock.clone(), &scenario.distances)
            .with_noise(scenario.noise_cm, scenario.seed);
        let outputs = SimOutputs::new(clock.clone());
        let sink = TracingStatusSink::new(clock.clone());

        tracing::debug!(
            name = %scenario.name,
            cycle_ms = scenario.cycle_ms,
            duration_ms = scenario.duration_ms,
            "scenario loaded"
        );

        Ok(Self {
            name: scenario.name.clone(),
            control: ControlLoop::new(system, keypad, sensor, outputs, sink),
            cycle_ms: scenario.cycle_ms,
            end_ms: scenario.duration_ms,
            cycles: 0,
            clock,
        })
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn control(&self) -> &SimControlLoop {
        &self.control
    }

    /// Scenario duration reached
    pub fn is_finished(&self) -> bool {
        self.clock.elapsed_ms() >= self.end_ms
    }

    /// Run one cycle and advance the clock
    pub fn step(&mut self) -> CycleReport {
        let report = self.control.run_cycle();
        self.cycles += 1;
        self.clock.advance_ms(self.cycle_ms as u64);
        report
    }

    /// Run to the end of the scenario as fast as possible
    pub fn run(mut self) -> Timeline {
        while !self.is_finished() {
            self.step();
        }
        self.finish()
    }

    /// Run to the end of the scenario, pacing cycles per `mode`.
    ///
    /// Falls back to free running for a non-finite or non-positive factor,
    /// and when the wall-clock period rounds to zero or overflows.
    pub async fn run_paced(mut self, mode: TimeMode) -> Timeline {
        let TimeMode::Scaled { factor } = mode else {
            return self.run();
        };
        if !factor.is_finite() || factor <= 0.0 {
            return self.run();
        }
        let period = match Duration::try_from_secs_f64(
            self.cycle_ms as f64 / 1000.0 / factor as f64,
        ) {
            Ok(period) if !period.is_zero() => period,
            // Below timer resolution or beyond `Duration`
            _ => return self.run(),
        };

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        while !self.is_finished() {
            interval.tick().await;
            self.step();
        }
        self.finish()
    }

    fn finish(self) -> Timeline {
        let system = self.control.system();
        Timeline {
            name: self.name.clone(),
            cycles: self.cycles,
            events: self.control.sink().events().to_vec(),
            outputs: self.control.outputs().changes().to_vec(),
            buzzer_activations: self.control.outputs().buzzer_activations,
            final_armed: system.is_armed(),
            final_trigger: system.state().trigger,
        }
    }
}
