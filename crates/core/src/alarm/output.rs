//! Output mapping
//!
//! A trigger decision is expressed as an [`OutputCommand`]: for each actuator
//! either a new state or `None` when the actuator is left as it is.

use crate::traits::AlarmOutputs;

/// Lamp and buzzer commands for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputCommand {
    /// New lamp state, `None` to leave unchanged
    pub lamp: Option<bool>,
    /// New buzzer state, `None` to leave unchanged
    pub buzzer: Option<bool>,
}

impl OutputCommand {
    /// Leave both actuators unchanged
    pub const NONE: Self = Self {
        lamp: None,
        buzzer: None,
    };

    /// Lamp and buzzer off
    pub const ALL_OFF: Self = Self {
        lamp: Some(false),
        buzzer: Some(false),
    };

    /// Lamp and buzzer on
    pub const ALARM: Self = Self {
        lamp: Some(true),
        buzzer: Some(true),
    };

    /// Lamp held on, buzzer not re-commanded
    pub const HOLD_LAMP: Self = Self {
        lamp: Some(true),
        buzzer: None,
    };

    /// Drive `outputs`. Actuators with a `None` command are not touched.
    pub fn apply<O: AlarmOutputs + ?Sized>(&self, outputs: &mut O) {
        if let Some(on) = self.lamp {
            outputs.set_lamp(on);
        }
        if let Some(on) = self.buzzer {
            outputs.set_buzzer(on);
        }
    }
}
