//! Hardware ports
//!
//! The sampler never talks to hardware directly. GPIO access and the color
//! sensor driver are provided by the host through these traits, which keeps
//! the sampling logic portable and testable with mocks.

use core::fmt::Debug;
use core::future::Future;

pub use embedded_hal::digital::PinState;

use crate::color::RawReading;
use crate::config::SensorConfig;

/// Direction a GPIO is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Output,
    Input,
}

/// GPIO access by pin identifier
pub trait PinControl {
    type Error: Debug;

    /// Configure the pin direction
    fn configure(&mut self, pin: &str, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive an output pin
    fn write(&mut self, pin: &str, state: PinState) -> Result<(), Self::Error>;
}

/// Shared bus able to address one color sensor at a time.
///
/// Both sensors may share addressing, so the bus context has to be
/// configured for a sensor before talking to it.
pub trait SensorBus {
    type Error: Debug;
    type Session: SensorSession<Error = Self::Error>;

    /// Configure the bus for `sensor` and return a session for it.
    ///
    /// The previous session must be dropped before acquiring a new one.
    fn acquire(&mut self, sensor: &SensorConfig) -> Result<Self::Session, Self::Error>;
}

/// Live bus context for a single sensor
pub trait SensorSession {
    type Error: Debug;

    /// Set the integration time used by the next reads
    fn set_integration_time(&mut self, ms: u8) -> impl Future<Output = Result<(), Self::Error>>;

    /// Read raw clear, red, green and blue counts
    fn read_raw(&mut self) -> impl Future<Output = Result<RawReading, Self::Error>>;

    /// Switch the illumination LED
    fn set_led(&mut self, on: bool) -> Result<(), Self::Error>;
}
