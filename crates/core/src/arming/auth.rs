//! Authentication Controller
//!
//! Consumes one optional key per cycle:
//!
//! - no key: nothing happens
//! - `*`: clear the entered code
//! - `#`: compare with the reference code; a match toggles `armed`
//! - any symbol: append while the buffer has room, otherwise drop it
//!
//! Arming clears the buffer. Disarming leaves it as typed, so a second `#`
//! right after a disarm re-arms with the same code. A mismatch changes
//! nothing but emits [`StatusEvent::IncorrectCode`].

use crate::arming::code::ReferenceCode;
use crate::keypad::Key;
use crate::state::SecuritySystemState;
use crate::status::StatusEvent;
use crate::traits::StatusSink;

/// Result of applying one key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// No key this cycle
    Idle,
    /// Symbol appended to the buffer
    Appended,
    /// Symbol dropped, buffer full
    Dropped,
    /// Buffer cleared with `*`
    Reset,
    /// Correct code, system armed
    Armed,
    /// Correct code, system disarmed
    Disarmed,
    /// Confirmed code did not match
    Rejected,
}

/// Keypad authentication controller
#[derive(Debug, Clone)]
pub struct AuthController {
    reference: ReferenceCode,
}

impl AuthController {
    pub fn new(reference: ReferenceCode) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceCode {
        &self.reference
    }

    /// Apply one key event to `state`.
    ///
    /// Total over all inputs; never fails.
    pub fn handle_key<S: StatusSink>(
        &self,
        state: &mut SecuritySystemState,
        key: Option<Key>,
        sink: &mut S,
    ) -> AuthOutcome {
        let Some(key) = key else {
            return AuthOutcome::Idle;
        };

        sink.notify(StatusEvent::KeyPressed(key));

        match key {
            Key::Reset => {
                state.entered_code.clear();
                sink.notify(StatusEvent::CodeReset);
                AuthOutcome::Reset
            }
            Key::Confirm => self.confirm(state, sink),
            Key::Symbol(symbol) => {
                if state.entered_code.push(symbol) {
                    sink.notify(StatusEvent::CodeProgress {
                        entered: state.entered_code.len(),
                    });
                    AuthOutcome::Appended
                } else {
                    AuthOutcome::Dropped
                }
            }
        }
    }

    fn confirm<S: StatusSink>(&self, state: &mut SecuritySystemState, sink: &mut S) -> AuthOutcome {
        if !state.entered_code.matches(&self.reference) {
            sink.notify(StatusEvent::IncorrectCode);
            return AuthOutcome::Rejected;
        }

        if state.armed {
            // Buffer intentionally kept: a following `#` re-arms
            state.armed = false;
            sink.notify(StatusEvent::Disarmed);
            AuthOutcome::Disarmed
        } else {
            state.armed = true;
            state.entered_code.clear();
            sink.notify(StatusEvent::Armed);
            AuthOutcome::Armed
        }
    }
}
