//! Diagnostic status events
//!
//! Human-readable notifications emitted by the controllers. They are purely
//! observational: nothing in the state machine reads them back.

use core::fmt;

use crate::keypad::Key;

/// Severity hint for routing a status event to a log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Per-cycle noise (monitoring with no intrusion)
    Trace,
    /// Normal operation
    Info,
    /// Operator or intrusion attention needed
    Warn,
}

/// Status notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// A key was read from the keypad
    KeyPressed(Key),
    /// A code symbol was appended; carries the new buffer length only
    CodeProgress {
        /// Symbols entered so far
        entered: usize,
    },
    /// Entered code cleared with `*`
    CodeReset,
    /// Correct code confirmed while disarmed
    Armed,
    /// Correct code confirmed while armed
    Disarmed,
    /// Confirmed code did not match
    IncorrectCode,
    /// Intrusion detected, alarm raised
    AlarmTriggered {
        /// Sample that caused the trigger (cm)
        distance_cm: u32,
    },
    /// Armed, not in cooldown, nothing within the threshold
    NoAlarm {
        /// Latest sample (cm)
        distance_cm: u32,
    },
    /// Cooldown window elapsed, monitoring resumes next cycle
    CooldownFinished,
}

impl StatusEvent {
    /// Suggested log severity
    pub fn severity(&self) -> Severity {
        match self {
            StatusEvent::IncorrectCode | StatusEvent::AlarmTriggered { .. } => Severity::Warn,
            StatusEvent::NoAlarm { .. } | StatusEvent::KeyPressed(_) => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::KeyPressed(key) => write!(f, "Key {}", key),
            StatusEvent::CodeProgress { entered } => write!(f, "Code entry: {} symbol(s)", entered),
            StatusEvent::CodeReset => write!(f, "Password reset"),
            StatusEvent::Armed => write!(f, "Password correct - Alarm activated"),
            StatusEvent::Disarmed => write!(f, "Alarm deactivated"),
            StatusEvent::IncorrectCode => write!(f, "Incorrect password"),
            StatusEvent::AlarmTriggered { distance_cm } => {
                write!(f, "Alarm went off ({} cm)", distance_cm)
            }
            StatusEvent::NoAlarm { distance_cm } => write!(f, "No Alarm ({} cm)", distance_cm),
            StatusEvent::CooldownFinished => write!(f, "Cooldown finished"),
        }
    }
}
