//! Trigger Controller
//!
//! Decides every cycle whether the alarm is active, from `armed`, the latest
//! distance sample and the time elapsed since the last trigger.
//!
//! # State Machine
//!
//! ```text
//!            armed == false (any state)
//!   +---------------------------------------------+
//!   v                                             |
//! Disarmed --armed--> Monitoring --d < thr--> Cooldown
//!                        ^                        |
//!                        +--- elapsed >= window --+
//! ```
//!
//! - **Disarmed**: lamp off, buzzer off, no distance evaluation.
//! - **Monitoring**: a sample below the threshold raises the alarm (lamp and
//!   buzzer on) and starts the cooldown; otherwise lamp and buzzer off.
//! - **Cooldown**: lamp held on, buzzer left as it is. When the window has
//!   elapsed the controller returns to Monitoring without commanding any
//!   output; the next sample is evaluated on the following cycle.
//!
//! Elapsed time is `now.wrapping_sub(start)` on 32-bit milliseconds, so the
//! window survives a wrap of the millisecond counter.

use crate::alarm::output::OutputCommand;
use crate::state::SecuritySystemState;
use crate::status::StatusEvent;
use crate::traits::StatusSink;

/// Trigger state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    /// Detection off
    #[default]
    Disarmed,
    /// Armed, evaluating every sample
    Monitoring,
    /// Alarm raised, re-triggering suppressed
    Cooldown {
        /// Timestamp of the trigger (ms, wrapping)
        started_ms: u32,
    },
}

/// Trigger controller with embedded cooldown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerController {
    distance_threshold_cm: u32,
    cooldown_duration_ms: u32,
}

impl TriggerController {
    /// # Arguments
    ///
    /// * `distance_threshold_cm` - Samples strictly below this trigger (cm)
    /// * `cooldown_duration_ms` - Suppression window after a trigger (ms)
    pub fn new(distance_threshold_cm: u32, cooldown_duration_ms: u32) -> Self {
        Self {
            distance_threshold_cm,
            cooldown_duration_ms,
        }
    }

    pub fn distance_threshold_cm(&self) -> u32 {
        self.distance_threshold_cm
    }

    pub fn cooldown_duration_ms(&self) -> u32 {
        self.cooldown_duration_ms
    }

    /// Advance the trigger state machine by one cycle.
    ///
    /// Reads `state.armed` and `state.last_distance_cm`, updates
    /// `state.trigger` and returns the actuator commands for this cycle.
    ///
    /// # Arguments
    ///
    /// * `state` - Controller state
    /// * `now_ms` - Current time (ms, wrapping 32-bit counter)
    /// * `sink` - Diagnostic channel
    pub fn update<S: StatusSink>(
        &self,
        state: &mut SecuritySystemState,
        now_ms: u32,
        sink: &mut S,
    ) -> OutputCommand {
        if !state.armed {
            state.trigger = TriggerState::Disarmed;
            return OutputCommand::ALL_OFF;
        }

        match state.trigger {
            TriggerState::Disarmed | TriggerState::Monitoring => {
                let distance_cm = state.last_distance_cm;
                if distance_cm < self.distance_threshold_cm {
                    state.trigger = TriggerState::Cooldown { started_ms: now_ms };
                    sink.notify(StatusEvent::AlarmTriggered { distance_cm });
                    OutputCommand::ALARM
                } else {
                    state.trigger = TriggerState::Monitoring;
                    sink.notify(StatusEvent::NoAlarm { distance_cm });
                    OutputCommand::ALL_OFF
                }
            }
            TriggerState::Cooldown { started_ms } => {
                if now_ms.wrapping_sub(started_ms) >= self.cooldown_duration_ms {
                    state.trigger = TriggerState::Monitoring;
                    sink.notify(StatusEvent::CooldownFinished);
                    OutputCommand::NONE
                } else {
                    OutputCommand::HOLD_LAMP
                }
            }
        }
    }
}
