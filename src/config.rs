//! Sampler configuration
//!
//! Configuration is either built in code (see [`SamplerConfig::default`]) or
//! parsed from JSON with [`SamplerConfig::from_json`]. It is validated once,
//! before the sampler starts, and never changes afterwards.

use core::fmt;

use embassy_time::Duration;
use heapless::{String, Vec};
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::store::StatePath;

/// Root segment of every published color path
pub const OUTPUT_ROOT: &str = "inputs";

/// Number of sensor slots the sampler alternates between
pub const SLOT_COUNT: usize = 2;

/// Maximum number of sensors accepted from a configuration source.
///
/// Anything other than [`SLOT_COUNT`] is rejected by validation.
pub const MAX_CONFIGURED_SENSORS: usize = 4;

/// Default time between two scheduler ticks
pub const DEFAULT_TICK_MS: u64 = 500;

/// Default time the LED lights the object before reading
pub const DEFAULT_SETTLE_MS: u32 = 250;

/// Default sensor integration time
pub const DEFAULT_INTEGRATION_TIME_MS: u8 = 24;

const DEFAULT_GROUP_NAME: &str = "color_sensors";

pub type SensorName = String<32>;
pub type BusId = String<32>;
pub type PinId = String<16>;
pub type PathText = String<64>;

/// Configuration errors, reported before scheduling starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Fewer than two sensors configured
    NotEnoughSensors { found: usize },
    /// More than two sensors configured
    TooManySensors { found: usize },
    /// Sensor or group name is empty or can't be used as a path segment
    InvalidName { slot: Option<usize> },
    /// Two sensors share the same name
    DuplicateName,
    /// Enable path of a sensor is not a valid state path
    MalformedEnablePath { slot: usize },
    /// Output path of a sensor doesn't fit into a state path
    MalformedOutputPath { slot: usize },
    /// Tick period is zero
    ZeroTickPeriod,
    /// A value doesn't fit into its fixed-size field
    ValueTooLong,
    /// JSON input could not be parsed
    Parse,
}

/// One color sensor and its wiring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Unique name, used as the last segment of the output path
    pub name: SensorName,
    /// Bus the sensor is attached to
    pub bus: BusId,
    /// GPIO driving the illumination LED
    pub led_pin: PinId,
    /// Interrupt GPIO, configured as input but not used for reading
    pub irq_pin: PinId,
    /// State path of the enable signal
    pub enable: PathText,
}

impl SensorConfig {
    /// Create a sensor configuration from string slices.
    pub fn new(
        name: &str,
        bus: &str,
        led_pin: &str,
        irq_pin: &str,
        enable: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            name: bounded(name)?,
            bus: bounded(bus)?,
            led_pin: bounded(led_pin)?,
            irq_pin: bounded(irq_pin)?,
            enable: bounded(enable)?,
        })
    }

    /// Parse the enable signal path
    pub fn enable_path(&self) -> Option<StatePath> {
        StatePath::parse(&self.enable).ok()
    }

    /// Path the sensor's color is published at, `inputs.<group>.<name>`
    pub fn output_path(&self, group: &str) -> Option<StatePath> {
        StatePath::from_segments(&[OUTPUT_ROOT, group, &self.name]).ok()
    }
}

/// Sampler timing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerTimings {
    /// Time between two scheduler ticks
    pub tick_ms: u64,
    /// Time the LED lights the object before the read starts
    pub settle_ms: u32,
    /// Integration time requested from the sensor before each read
    pub integration_time_ms: u8,
}

impl SamplerTimings {
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for SamplerTimings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            integration_time_ms: DEFAULT_INTEGRATION_TIME_MS,
        }
    }
}

/// Complete sampler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplerConfig {
    /// Group name, the middle segment of every output path
    pub name: SensorName,
    /// Sensors in slot order
    pub sensors: Vec<SensorConfig, MAX_CONFIGURED_SENSORS>,
    pub timings: SamplerTimings,
}

impl SamplerConfig {
    /// Create a configuration for two sensors with default timings.
    pub fn new(name: &str, first: SensorConfig, second: SensorConfig) -> Result<Self, ConfigError> {
        let mut sensors = Vec::new();
        sensors.push(first).map_err(|_| ConfigError::TooManySensors { found: 1 })?;
        sensors.push(second).map_err(|_| ConfigError::TooManySensors { found: 2 })?;
        Ok(Self {
            name: bounded(name)?,
            sensors,
            timings: SamplerTimings::default(),
        })
    }

    /// Replace the timings
    #[must_use]
    pub const fn with_timings(mut self, timings: SamplerTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Sensors past [`MAX_CONFIGURED_SENSORS`] are counted but not kept, so
    /// an oversized list still reports [`ConfigError::TooManySensors`].
    pub fn from_json(json: &[u8]) -> Result<Self, ConfigError> {
        let (parsed, _): (JsonConfig, usize) =
            serde_json_core::from_slice(json).map_err(|_| ConfigError::Parse)?;

        let found = parsed.sensors.found;
        if found > SLOT_COUNT {
            return Err(ConfigError::TooManySensors { found });
        }

        let config = Self {
            name: parsed.name,
            sensors: parsed.sensors.items,
            timings: parsed.timings,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration can drive the sampler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let found = self.sensors.len();
        if found < SLOT_COUNT {
            return Err(ConfigError::NotEnoughSensors { found });
        }
        if found > SLOT_COUNT {
            return Err(ConfigError::TooManySensors { found });
        }
        if self.timings.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if !is_segment(&self.name) {
            return Err(ConfigError::InvalidName { slot: None });
        }

        for (slot, sensor) in self.sensors.iter().enumerate() {
            if !is_segment(&sensor.name) {
                return Err(ConfigError::InvalidName { slot: Some(slot) });
            }
            if sensor.enable_path().is_none() {
                return Err(ConfigError::MalformedEnablePath { slot });
            }
            if sensor.output_path(&self.name).is_none() {
                return Err(ConfigError::MalformedOutputPath { slot });
            }
        }

        if self.sensors[0].name == self.sensors[1].name {
            return Err(ConfigError::DuplicateName);
        }

        Ok(())
    }
}

impl Default for SamplerConfig {
    /// Left and right sensors on separate buses, each enabled by a button
    fn default() -> Self {
        let mut sensors = Vec::new();
        let _ = sensors.push(SensorConfig {
            name: literal("color_left"),
            bus: literal("/dev/i2c-2"),
            led_pin: literal("P9_23"),
            irq_pin: literal("P9_15"),
            enable: literal("inputs.buttons.button_left"),
        });
        let _ = sensors.push(SensorConfig {
            name: literal("color_right"),
            bus: literal("/dev/i2c-1"),
            led_pin: literal("P9_25"),
            irq_pin: literal("P9_27"),
            enable: literal("inputs.buttons.button_right"),
        });
        Self {
            name: default_group_name(),
            sensors,
            timings: SamplerTimings::default(),
        }
    }
}

/// JSON shape of [`SamplerConfig`]
#[derive(Deserialize)]
struct JsonConfig {
    #[serde(default = "default_group_name")]
    name: SensorName,
    sensors: SensorList,
    #[serde(default)]
    timings: SamplerTimings,
}

/// Sensor array that keeps the element count past its capacity
struct SensorList {
    items: Vec<SensorConfig, MAX_CONFIGURED_SENSORS>,
    found: usize,
}

impl<'de> Deserialize<'de> for SensorList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = SensorList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of sensors")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SensorList, A::Error> {
                let mut items = Vec::new();
                let mut found = 0;
                while let Some(sensor) = seq.next_element::<SensorConfig>()? {
                    found += 1;
                    // Overflowing sensors only count
                    let _ = items.push(sensor);
                }
                Ok(SensorList { items, found })
            }
        }

        deserializer.deserialize_seq(ListVisitor)
    }
}

fn default_group_name() -> SensorName {
    literal(DEFAULT_GROUP_NAME)
}

fn is_segment(value: &str) -> bool {
    !value.is_empty() && !value.contains(crate::store::PATH_SEPARATOR)
}

fn bounded<const N: usize>(value: &str) -> Result<String<N>, ConfigError> {
    String::try_from(value).map_err(|()| ConfigError::ValueTooLong)
}

/// Built-in defaults always fit their fields
fn literal<const N: usize>(value: &'static str) -> String<N> {
    String::try_from(value).unwrap_or_default()
}
