//! Per-cycle orchestration
//!
//! [`SecuritySystem`] owns the state and both controllers. [`ControlLoop`]
//! adds the devices and runs one polling cycle at a time:
//!
//! 1. poll the keypad
//! 2. update the authentication controller
//! 3. sample the ranging sensor
//! 4. update the trigger controller (reads `armed` from step 2)
//! 5. drive the lamp and buzzer
//!
//! A disarm and a near sample in the same cycle therefore resolve to
//! outputs off. Timing only depends on the injected [`TimeSource`], never on
//! how often the loop runs.

use crate::alarm::{OutputCommand, TriggerController, TriggerState};
use crate::arming::{AuthController, AuthOutcome};
use crate::config::AlarmConfig;
use crate::error::ConfigError;
use crate::keypad::Key;
use crate::state::SecuritySystemState;
use crate::traits::{AlarmOutputs, KeySource, RangeSensor, StatusSink, TimeSource};

/// What happened during one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Key read this cycle
    pub key: Option<Key>,
    /// Effect of the key on the authentication controller
    pub auth: AuthOutcome,
    /// Whether the system is armed after the key was applied
    pub armed: bool,
    /// Distance sample (cm)
    pub distance_cm: u32,
    /// Time used for the trigger evaluation (ms, wrapping)
    pub now_ms: u32,
    /// Trigger state after the update
    pub trigger: TriggerState,
    /// Actuator commands issued
    pub command: OutputCommand,
}

/// Security state machine: state plus both controllers
#[derive(Debug)]
pub struct SecuritySystem<T: TimeSource> {
    config: AlarmConfig,
    auth: AuthController,
    trigger: TriggerController,
    state: SecuritySystemState,
    time: T,
}

impl<T: TimeSource> SecuritySystem<T> {
    /// Create a disarmed system.
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`, if any.
    pub fn new(config: AlarmConfig, time: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            auth: AuthController::new(config.reference_code.clone()),
            trigger: TriggerController::new(
                config.distance_threshold_cm,
                config.cooldown_duration_ms,
            ),
            state: SecuritySystemState::new(config.code_length),
            config,
            time,
        })
    }

    pub fn config(&self) -> &AlarmConfig {
        &self.config
    }

    pub fn state(&self) -> &SecuritySystemState {
        &self.state
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn is_armed(&self) -> bool {
        self.state.armed
    }

    /// Authentication step of a cycle
    pub fn handle_key<S: StatusSink>(&mut self, key: Option<Key>, sink: &mut S) -> AuthOutcome {
        self.auth.handle_key(&mut self.state, key, sink)
    }

    /// Trigger step of a cycle: record the sample and evaluate it at the
    /// current time
    pub fn evaluate<S: StatusSink>(&mut self, distance_cm: u32, sink: &mut S) -> OutputCommand {
        self.evaluate_timed(distance_cm, sink).0
    }

    /// [`Self::evaluate`], also returning the time the sample was evaluated at
    fn evaluate_timed<S: StatusSink>(
        &mut self,
        distance_cm: u32,
        sink: &mut S,
    ) -> (OutputCommand, u32) {
        self.state.last_distance_cm = distance_cm;
        let now_ms = self.time.now_ms();
        (self.trigger.update(&mut self.state, now_ms, sink), now_ms)
    }

    /// Run both steps with an already known key and sample
    pub fn step<S: StatusSink>(
        &mut self,
        key: Option<Key>,
        distance_cm: u32,
        sink: &mut S,
    ) -> CycleReport {
        let auth = self.handle_key(key, sink);
        let (command, now_ms) = self.evaluate_timed(distance_cm, sink);
        self.report(key, auth, command, now_ms)
    }

    fn report(
        &self,
        key: Option<Key>,
        auth: AuthOutcome,
        command: OutputCommand,
        now_ms: u32,
    ) -> CycleReport {
        CycleReport {
            key,
            auth,
            armed: self.state.armed,
            distance_cm: self.state.last_distance_cm,
            now_ms,
            trigger: self.state.trigger,
            command,
        }
    }
}

/// Security system wired to its devices
pub struct ControlLoop<T, K, R, O, S>
where
    T: TimeSource,
    K: KeySource,
    R: RangeSensor,
    O: AlarmOutputs,
    S: StatusSink,
{
    system: SecuritySystem<T>,
    keypad: K,
    sensor: R,
    outputs: O,
    sink: S,
}

impl<T, K, R, O, S> ControlLoop<T, K, R, O, S>
where
    T: TimeSource,
    K: KeySource,
    R: RangeSensor,
    O: AlarmOutputs,
    S: StatusSink,
{
    /// Wire a system to its devices and command both actuators off
    pub fn new(system: SecuritySystem<T>, keypad: K, sensor: R, mut outputs: O, sink: S) -> Self {
        OutputCommand::ALL_OFF.apply(&mut outputs);
        Self {
            system,
            keypad,
            sensor,
            outputs,
            sink,
        }
    }

    /// Run one polling cycle
    pub fn run_cycle(&mut self) -> CycleReport {
        let key = self.keypad.poll();
        let auth = self.system.handle_key(key, &mut self.sink);

        let distance_cm = self.sensor.measure();
        let (command, now_ms) = self.system.evaluate_timed(distance_cm, &mut self.sink);
        command.apply(&mut self.outputs);

        self.system.report(key, auth, command, now_ms)
    }

    pub fn system(&self) -> &SecuritySystem<T> {
        &self.system
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    pub fn sensor_mut(&mut self) -> &mut R {
        &mut self.sensor
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
