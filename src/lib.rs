#![no_std]

pub mod color;
pub mod config;
pub mod driver;
pub mod gamma;
pub mod pacer;
pub mod report;
pub mod sampler;
pub mod store;

pub use color::{RawReading, Rgb, normalize};
pub use config::{SamplerConfig, SamplerTimings, SensorConfig};
pub use driver::{PinControl, PinMode, SensorBus, SensorSession};
pub use gamma::GammaTable;
pub use pacer::TickPacer;
pub use report::{Channel, FaultChannel, FaultReceiver, FaultSender, SampleFault};
pub use sampler::{ColorSampler, InitError, SensorError, TickOutcome};
pub use store::{MemoryStore, StatePath, StateStore, StateValue, StoreFull};

pub use embassy_time::{Duration, Instant};

/// Lifecycle hook of a host input
///
/// The host calls `init` once at startup, before any scheduling starts.
pub trait Lifecycle {
    type Error;

    /// Prepare hardware and publish initial state
    fn init(&mut self) -> Result<(), Self::Error>;
}
