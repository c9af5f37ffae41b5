//! Security system state
//!
//! The single mutable state object of the controller. It is created at
//! startup, owned by the control loop and lent by `&mut` to each controller
//! once per cycle. Nothing is persisted: every boot starts disarmed with an
//! empty code buffer.

use crate::alarm::TriggerState;
use crate::arming::EnteredCode;

/// Mutable controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySystemState {
    /// Intrusion detection active. Written only by the authentication controller.
    pub armed: bool,
    /// Code being typed. Written only by the authentication controller.
    pub entered_code: EnteredCode,
    /// Most recent distance sample (cm), overwritten every cycle
    pub last_distance_cm: u32,
    /// Trigger state machine. Written only by the trigger controller.
    pub trigger: TriggerState,
}

impl SecuritySystemState {
    /// Initial state: disarmed, empty buffer of `code_length` symbols
    pub fn new(code_length: usize) -> Self {
        Self {
            armed: false,
            entered_code: EnteredCode::new(code_length),
            last_distance_cm: 0,
            trigger: TriggerState::Disarmed,
        }
    }

    /// Whether re-triggering is currently suppressed
    pub fn cooldown_active(&self) -> bool {
        matches!(self.trigger, TriggerState::Cooldown { .. })
    }

    /// Timestamp of the trigger that started the current cooldown
    pub fn cooldown_start_ms(&self) -> Option<u32> {
        match self.trigger {
            TriggerState::Cooldown { started_ms } => Some(started_ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SecuritySystemState::new(4);
        assert!(!state.armed);
        assert!(state.entered_code.is_empty());
        assert_eq!(state.entered_code.capacity(), 4);
        assert_eq!(state.trigger, TriggerState::Disarmed);
        assert!(!state.cooldown_active());
        assert_eq!(state.cooldown_start_ms(), None);
    }

    #[test]
    fn test_cooldown_accessors() {
        let mut state = SecuritySystemState::new(4);
        state.trigger = TriggerState::Cooldown { started_ms: 1234 };
        assert!(state.cooldown_active());
        assert_eq!(state.cooldown_start_ms(), Some(1234));
    }
}
