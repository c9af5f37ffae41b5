use std::cell::Cell;
use std::rc::Rc;

use intrusion_alarm_core::traits::TimeSource;

/// Pacing of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeMode {
    /// Cycles run back to back; simulated time is decoupled from wall time.
    #[default]
    FreeRunning,
    /// Each cycle waits for its period divided by `factor` of wall time.
    Scaled { factor: f32 },
}

/// Simulated clock.
///
/// Scenario time starts at zero. The state machine sees scenario time plus a
/// boot offset, which lets a scenario start just before the 32-bit
/// millisecond counter wraps. Clones share the same counter; only the
/// scenario runner advances it.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    boot_offset_us: u64,
    elapsed_us: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose scenario start is `ms` milliseconds after boot
    pub fn with_boot_offset_ms(ms: u64) -> Self {
        Self {
            boot_offset_us: ms.saturating_mul(1000),
            elapsed_us: Rc::default(),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        let elapsed = self.elapsed_us.get();
        self.elapsed_us
            .set(elapsed.saturating_add(ms.saturating_mul(1000)));
    }

    /// Scenario time (ms)
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_us.get() / 1000
    }
}

impl TimeSource for SimClock {
    fn now_us(&self) -> u64 {
        self.boot_offset_us.saturating_add(self.elapsed_us.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_time() {
        let clock = SimClock::new();
        let other = clock.clone();
        clock.advance_ms(25);
        assert_eq!(other.now_us(), 25_000);
        assert_eq!(other.elapsed_ms(), 25);
    }

    #[test]
    fn test_boot_offset_only_visible_to_state_machine() {
        let clock = SimClock::with_boot_offset_ms(u32::MAX as u64);
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.now_ms(), u32::MAX);

        clock.advance_ms(1);
        assert_eq!(clock.elapsed_ms(), 1);
        assert_eq!(clock.now_ms(), 0);
    }
}
