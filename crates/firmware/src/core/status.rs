//! Status routing
//!
//! Implements the diagnostic channel of the state machine on top of the log
//! macros. Events are rendered into a fixed-size buffer first so the same
//! text reaches defmt on target and stdout in host tests.

use core::fmt::Write;

use heapless::String;
use intrusion_alarm_core::status::Severity;
use intrusion_alarm_core::traits::StatusSink;
use intrusion_alarm_core::StatusEvent;

/// Rendered message capacity
const STATUS_MSG_SIZE: usize = 64;

/// Diagnostic channel backed by the log macros
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatusSink;

impl LogStatusSink {
    pub const fn new() -> Self {
        Self
    }
}

/// Render an event, truncating at [`STATUS_MSG_SIZE`] bytes
pub fn render(event: &StatusEvent) -> String<STATUS_MSG_SIZE> {
    let mut message = String::new();
    let _ = write!(message, "{}", event);
    message
}

impl StatusSink for LogStatusSink {
    fn notify(&mut self, event: StatusEvent) {
        let message = render(&event);
        match event.severity() {
            Severity::Warn => crate::log_warn!("{}", message.as_str()),
            Severity::Info => crate::log_info!("{}", message.as_str()),
            Severity::Trace => crate::log_trace!("{}", message.as_str()),
        }
    }
}
