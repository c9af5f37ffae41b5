use intrusion_alarm_core::status::Severity;
use intrusion_alarm_core::traits::StatusSink;
use intrusion_alarm_core::StatusEvent;

use crate::time::SimClock;

/// Status event with its simulated timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    /// Scenario time (ms)
    pub at_ms: u64,
    pub event: StatusEvent,
}

/// Status sink that logs through `tracing` and keeps a timeline
#[derive(Debug)]
pub struct TracingStatusSink {
    clock: SimClock,
    events: Vec<TimedEvent>,
    /// Keep per-cycle `NoAlarm` events in the timeline
    record_no_alarm: bool,
}

impl TracingStatusSink {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            events: Vec::new(),
            record_no_alarm: false,
        }
    }

    /// Also record `NoAlarm`, which is emitted every armed cycle
    pub fn recording_no_alarm(mut self) -> Self {
        self.record_no_alarm = true;
        self
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn contains(&self, event: &StatusEvent) -> bool {
        self.events.iter().any(|timed| &timed.event == event)
    }
}

impl StatusSink for TracingStatusSink {
    fn notify(&mut self, event: StatusEvent) {
        let at_ms = self.clock.elapsed_ms();
        match event.severity() {
            Severity::Warn => tracing::warn!(at_ms, "{}", event),
            Severity::Info => tracing::info!(at_ms, "{}", event),
            Severity::Trace => tracing::trace!(at_ms, "{}", event),
        }

        if matches!(event, StatusEvent::NoAlarm { .. }) && !self.record_no_alarm {
            return;
        }
        self.events.push(TimedEvent { at_ms, event });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_timestamped() {
        let clock = SimClock::new();
        let mut sink = TracingStatusSink::new(clock.clone());
        clock.advance_ms(40);
        sink.notify(StatusEvent::Armed);

        assert_eq!(
            sink.events(),
            &[TimedEvent {
                at_ms: 40,
                event: StatusEvent::Armed
            }]
        );
    }

    #[test]
    fn test_no_alarm_filtered_by_default() {
        let clock = SimClock::new();
        let mut sink = TracingStatusSink::new(clock.clone());
        sink.notify(StatusEvent::NoAlarm { distance_cm: 90 });
        assert!(sink.events().is_empty());

        let mut sink = TracingStatusSink::new(clock).recording_no_alarm();
        sink.notify(StatusEvent::NoAlarm { distance_cm: 90 });
        assert!(sink.contains(&StatusEvent::NoAlarm { distance_cm: 90 }));
    }
}
