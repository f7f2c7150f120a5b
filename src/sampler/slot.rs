use crate::config::{ConfigError, SamplerConfig, SensorConfig};
use crate::store::StatePath;

/// Phase of a slot on the tick it is serviced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    /// Enable signal is off
    Disabled,
    /// Enable signal turned on since the slot was last serviced
    JustEnabled,
    /// Enable signal was already on
    Enabled,
}

impl SlotPhase {
    /// Derive the phase from the fresh enable signal and the stored flag
    pub const fn observe(signal: bool, was_enabled: bool) -> Self {
        match (signal, was_enabled) {
            (false, _) => Self::Disabled,
            (true, false) => Self::JustEnabled,
            (true, true) => Self::Enabled,
        }
    }
}

/// One position of the alternation schedule
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) sensor: SensorConfig,
    pub(crate) enable: StatePath,
    pub(crate) output: StatePath,
    /// Whether the slot is currently treated as enabled
    pub(crate) enabled: bool,
}

impl Slot {
    pub(crate) fn from_config(config: &SamplerConfig, index: usize) -> Result<Self, ConfigError> {
        let sensor = config
            .sensors
            .get(index)
            .ok_or(ConfigError::NotEnoughSensors {
                found: config.sensors.len(),
            })?;
        let enable = sensor
            .enable_path()
            .ok_or(ConfigError::MalformedEnablePath { slot: index })?;
        let output = sensor
            .output_path(&config.name)
            .ok_or(ConfigError::MalformedOutputPath { slot: index })?;

        Ok(Self {
            sensor: sensor.clone(),
            enable,
            output,
            enabled: false,
        })
    }
}
