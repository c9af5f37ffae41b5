use intrusion_alarm_core::ConfigError;

/// Errors that can occur while loading or running a scenario.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid alarm configuration: {0}")]
    InvalidConfig(ConfigError),

    #[error("Key not on keypad: {0:?}")]
    InvalidKey(char),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(&'static str),
}

impl From<ConfigError> for SimulatorError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}
