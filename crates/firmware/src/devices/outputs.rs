//! Alarm actuators
//!
//! - [`Lamp`]: red lamp on a push-pull GPIO
//! - [`PiezoBuzzer`]: piezo on a PWM channel. The slice frequency is set to
//!   [`BUZZER_TONE_HZ`] once at startup; the driver only switches the duty
//!   cycle between 50 % (tone) and 0 % (silent)
//! - [`AlarmActuators`]: both, behind the core `AlarmOutputs` trait

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use intrusion_alarm_core::traits::AlarmOutputs;

use crate::platform::{GpioError, PwmError, Result};

/// Buzzer tone frequency (Hz)
pub const BUZZER_TONE_HZ: u32 = 400;

/// Duty cycle while sounding (%)
pub const BUZZER_DUTY_PERCENT: u8 = 50;

/// Compute the PWM counter wrap value ("top") that produces `tone_hz`.
///
/// The counter runs at `sys_clk_hz / divider` and counts `top + 1` steps per
/// period.
///
/// # Errors
///
/// Returns `PwmError::InvalidFrequency` if the divider or tone is zero or
/// the period does not fit the 16-bit counter.
pub fn pwm_top_for_tone(sys_clk_hz: u32, divider: u8, tone_hz: u32) -> Result<u16> {
    if divider == 0 || tone_hz == 0 {
        return Err(PwmError::InvalidFrequency.into());
    }
    let counts = sys_clk_hz / divider as u32 / tone_hz;
    if counts == 0 || counts > u16::MAX as u32 + 1 {
        return Err(PwmError::InvalidFrequency.into());
    }
    Ok((counts - 1) as u16)
}

/// Lamp on a GPIO output
pub struct Lamp<P: OutputPin> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> Lamp<P> {
    /// Wrap a pin that is already low
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| GpioError::WriteFailed)?;
        self.lit = on;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

/// Piezo buzzer on a PWM channel
pub struct PiezoBuzzer<P: SetDutyCycle> {
    channel: P,
    sounding: bool,
}

impl<P: SetDutyCycle> PiezoBuzzer<P> {
    /// Wrap a PWM channel configured for [`BUZZER_TONE_HZ`]
    pub fn new(channel: P) -> Self {
        Self {
            channel,
            sounding: false,
        }
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        let result = if on {
            self.channel.set_duty_cycle_percent(BUZZER_DUTY_PERCENT)
        } else {
            self.channel.set_duty_cycle_fully_off()
        };
        result.map_err(|_| PwmError::DutyCycleFailed)?;
        if on {
            crate::log_info!("Buzzer activated");
        }
        self.sounding = on;
        Ok(())
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}

/// Lamp and buzzer driven by the trigger controller
pub struct AlarmActuators<L: OutputPin, B: SetDutyCycle> {
    lamp: Lamp<L>,
    buzzer: PiezoBuzzer<B>,
}

impl<L: OutputPin, B: SetDutyCycle> AlarmActuators<L, B> {
    pub fn new(lamp: Lamp<L>, buzzer: PiezoBuzzer<B>) -> Self {
        Self { lamp, buzzer }
    }

    pub fn lamp(&self) -> &Lamp<L> {
        &self.lamp
    }

    pub fn buzzer(&self) -> &PiezoBuzzer<B> {
        &self.buzzer
    }
}

impl<L: OutputPin, B: SetDutyCycle> AlarmOutputs for AlarmActuators<L, B> {
    fn set_lamp(&mut self, on: bool) {
        if let Err(e) = self.lamp.set(on) {
            crate::log_error!("Lamp command failed: {}", e);
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        if let Err(e) = self.buzzer.set(on) {
            crate::log_error!("Buzzer command failed: {}", e);
        }
    }
}
