use derive_more::From;

use crate::config::ConfigError;
use crate::store::StoreFull;

/// Errors of a single sampling attempt.
///
/// `E` is the error reported by the sensor driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError<E> {
    /// Bus could not be configured for the sensor
    Acquire(E),
    /// Switching the illumination LED failed
    Led(E),
    /// Integration time could not be set
    IntegrationTime(E),
    /// Raw channel read failed
    Read(E),
    /// The store refused the color
    Publish(StoreFull),
}

impl<E> SensorError<E> {
    /// Driver error behind this failure, `None` for store failures
    pub const fn cause(&self) -> Option<&E> {
        match self {
            Self::Acquire(err) | Self::Led(err) | Self::IntegrationTime(err) | Self::Read(err) => {
                Some(err)
            }
            Self::Publish(_) => None,
        }
    }
}

/// Errors raised before scheduling starts
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum InitError<E> {
    /// Configuration is unusable
    Config(ConfigError),
    /// GPIO configuration failed
    #[from(skip)]
    Pin(E),
    /// An output path could not be declared
    Store(StoreFull),
}
