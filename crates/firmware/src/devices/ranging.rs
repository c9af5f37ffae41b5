//! Ultrasonic ranging driver (HC-SR04 style)
//!
//! One measurement is a request/echo cycle:
//!
//! 1. trigger low for 2 µs, high for 10 µs, then low again
//! 2. wait for the echo line to rise
//! 3. time how long the echo line stays high
//!
//! The echo time converts to centimeters with
//! [`echo_us_to_cm`](intrusion_alarm_core::ranging::echo_us_to_cm). A
//! timeout in either wait yields an echo of 0 µs, hence 0 cm. That reading is
//! passed on to the state machine unchanged.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use intrusion_alarm_core::ranging::echo_us_to_cm;
use intrusion_alarm_core::traits::{RangeSensor, TimeSource};

use crate::platform::{GpioError, Result};

/// Give up waiting on the echo line after this long (µs)
pub const ECHO_TIMEOUT_US: u64 = 1_000_000;

/// Trigger settle time before the pulse (µs)
const TRIGGER_SETTLE_US: u32 = 2;

/// Trigger pulse width (µs)
const TRIGGER_PULSE_US: u32 = 10;

/// Ultrasonic ranger
pub struct UltrasonicRanger<Trig, Echo, D, T>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    T: TimeSource,
{
    trigger: Trig,
    echo: Echo,
    delay: D,
    time: T,
    timeout_us: u64,
}

impl<Trig, Echo, D, T> UltrasonicRanger<Trig, Echo, D, T>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    T: TimeSource,
{
    /// # Arguments
    ///
    /// * `trigger` - Trigger output
    /// * `echo` - Echo input
    /// * `delay` - Microsecond delay for the trigger pulse
    /// * `time` - Microsecond clock for echo timing
    pub fn new(trigger: Trig, echo: Echo, delay: D, time: T) -> Self {
        Self {
            trigger,
            echo,
            delay,
            time,
            timeout_us: ECHO_TIMEOUT_US,
        }
    }

    /// Override the echo timeout
    pub fn with_timeout_us(mut self, timeout_us: u64) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Run one request/echo cycle and return the echo time (µs).
    ///
    /// Returns `Ok(0)` on timeout.
    pub fn measure_echo_us(&mut self) -> Result<u32> {
        self.send_trigger_pulse()?;

        let wait_start = self.time.now_us();
        while self.echo.is_low().map_err(|_| GpioError::ReadFailed)? {
            if self.time.elapsed_since(wait_start) >= self.timeout_us {
                return Ok(0);
            }
        }

        let rise = self.time.now_us();
        while self.echo.is_high().map_err(|_| GpioError::ReadFailed)? {
            if self.time.elapsed_since(rise) >= self.timeout_us {
                return Ok(0);
            }
        }

        let echo_us = self.time.elapsed_since(rise);
        Ok(u32::try_from(echo_us).unwrap_or(u32::MAX))
    }

    /// Measure the distance (cm)
    pub fn measure_cm(&mut self) -> Result<u32> {
        self.measure_echo_us().map(echo_us_to_cm)
    }

    fn send_trigger_pulse(&mut self) -> Result<()> {
        self.trigger.set_low().map_err(|_| GpioError::WriteFailed)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high().map_err(|_| GpioError::WriteFailed)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|_| GpioError::WriteFailed)?;
        Ok(())
    }
}

impl<Trig, Echo, D, T> RangeSensor for UltrasonicRanger<Trig, Echo, D, T>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    T: TimeSource,
{
    fn measure(&mut self) -> u32 {
        match self.measure_cm() {
            Ok(cm) => cm,
            Err(e) => {
                // Same reading as an echo timeout
                crate::log_warn!("Ranging failed: {}", e);
                0
            }
        }
    }
}
