//! Control loop runner
//!
//! Drives a [`ControlLoop`] from an Embassy ticker. Each tick runs one full
//! cycle (keypad, authentication, ranging, trigger, actuators). Timing of the
//! cooldown comes from the injected time source, so a late tick only delays
//! when an expiry is noticed.

use embassy_time::{Duration, Ticker};
use intrusion_alarm_core::traits::{AlarmOutputs, KeySource, RangeSensor, StatusSink, TimeSource};
use intrusion_alarm_core::{ControlLoop, TriggerState};

/// Polling period (ms)
pub const LOOP_PERIOD_MS: u64 = 10;

/// Run the control loop forever.
///
/// Embassy tasks cannot be generic, so the binary awaits this from its
/// `main` task instead of spawning it.
///
/// # Example
///
/// ```rust,ignore
/// #[embassy_executor::main]
/// async fn main(_spawner: Spawner) {
///     let control = ControlLoop::new(system, keypad, ranger, actuators, LogStatusSink::new());
///     run_control_loop(control).await;
/// }
/// ```
pub async fn run_control_loop<T, K, R, O, S>(mut control: ControlLoop<T, K, R, O, S>) -> !
where
    T: TimeSource,
    K: KeySource,
    R: RangeSensor,
    O: AlarmOutputs,
    S: StatusSink,
{
    crate::log_info!("Control loop started ({} ms period)", LOOP_PERIOD_MS);

    let mut ticker = Ticker::every(Duration::from_millis(LOOP_PERIOD_MS));
    let mut last_state = control.system().state().trigger;

    loop {
        let report = control.run_cycle();

        if report.trigger != last_state {
            match report.trigger {
                TriggerState::Disarmed => crate::log_debug!("Trigger: disarmed"),
                TriggerState::Monitoring => crate::log_debug!("Trigger: monitoring"),
                TriggerState::Cooldown { started_ms } => {
                    crate::log_debug!("Trigger: cooldown since {} ms", started_ms)
                }
            }
            last_state = report.trigger;
        }

        ticker.next().await;
    }
}
