//! Two-slot color sampler
//!
//! The sampler alternates between two sensor slots. Every tick services the
//! active slot only:
//!
//! - enable signal off: nothing is read, the slot forgets it was enabled and
//!   the other slot becomes active;
//! - enable signal just turned on: the slot's color is reset to black and
//!   the slot stays active, so the real read happens on the next tick;
//! - enable signal still on: the sensor is lit and read, its color is
//!   published, the LED is switched off and the bus handed back to slot 0,
//!   then the other slot becomes active.
//!
//! With both sensors enabled each one is read every other tick.

mod error;
mod slot;

use embassy_time::{Instant, Timer};
use embedded_hal_async::delay::DelayNs;

#[cfg(feature = "log")]
use esp_println::println;

pub use error::{InitError, SensorError};
use slot::Slot;
pub use slot::SlotPhase;

use crate::color::{BLACK, RawReading, Rgb, normalize};
use crate::config::{SLOT_COUNT, SamplerConfig, SamplerTimings, SensorConfig};
use crate::driver::{PinControl, PinMode, PinState, SensorBus, SensorSession};
use crate::gamma::GammaTable;
use crate::pacer::TickPacer;
use crate::report::{FaultSender, SampleFault};
use crate::store::{StatePath, StateStore, StateValue};
use crate::Lifecycle;

/// Slot that owns the bus context between reads
const DEFAULT_SLOT: usize = 0;

/// Result of the cleanup steps that follow a published read
type Cleanup<E> = Result<(), SensorError<E>>;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Slot was disabled, nothing was read
    Idle { slot: usize },
    /// Slot was just enabled, its color was reset to black
    Armed { slot: usize },
    /// Slot was read and its color published
    Sampled { slot: usize, color: Rgb },
}

impl TickOutcome {
    /// Slot serviced by the tick
    pub const fn slot(self) -> usize {
        match self {
            Self::Idle { slot } | Self::Armed { slot } | Self::Sampled { slot, .. } => slot,
        }
    }
}

/// Color sampler - the scheduling state machine
pub struct ColorSampler<B, P, S, D>
where
    B: SensorBus,
    P: PinControl,
    S: StateStore,
    D: DelayNs,
{
    // External dependencies and configuration
    bus: B,
    pins: P,
    store: S,
    delay: D,
    timings: SamplerTimings,

    // Internal state
    gamma: GammaTable,
    slots: [Slot; SLOT_COUNT],
    active: usize,
}

impl<B, P, S, D> ColorSampler<B, P, S, D>
where
    B: SensorBus,
    P: PinControl,
    S: StateStore,
    D: DelayNs,
{
    /// Create a new sampler.
    ///
    /// Validates the configuration and builds the gamma table. Nothing is
    /// written to the pins or the store until [`Lifecycle::init`] is called.
    pub fn new(
        config: &SamplerConfig,
        bus: B,
        pins: P,
        store: S,
        delay: D,
    ) -> Result<Self, InitError<P::Error>> {
        config.validate()?;
        let slots = [Slot::from_config(config, 0)?, Slot::from_config(config, 1)?];

        Ok(Self {
            bus,
            pins,
            store,
            delay,
            timings: config.timings,
            gamma: GammaTable::build(),
            slots,
            active: 0,
        })
    }

    /// Service the active slot once.
    ///
    /// When the read or the publish fails, the store keeps its last color
    /// and the active slot doesn't change, so the next tick retries the same
    /// sensor. Once a color is published, errors from switching the LED off
    /// or handing the bus back are still returned, but the slot counts as
    /// sampled and the other slot becomes active.
    pub async fn tick(&mut self) -> Result<TickOutcome, SensorError<B::Error>> {
        let index = self.active;
        let signal = self.store.is_enabled(&self.slots[index].enable);

        match SlotPhase::observe(signal, self.slots[index].enabled) {
            SlotPhase::Disabled => {
                #[cfg(feature = "log")]
                if self.slots[index].enabled {
                    println!("sampler: {} disabled", self.slots[index].sensor.name);
                }
                self.slots[index].enabled = false;
                self.advance();
                Ok(TickOutcome::Idle { slot: index })
            }
            SlotPhase::JustEnabled => {
                #[cfg(feature = "log")]
                println!("sampler: {} enabled", self.slots[index].sensor.name);
                self.publish(index, BLACK)?;
                self.slots[index].enabled = true;
                Ok(TickOutcome::Armed { slot: index })
            }
            SlotPhase::Enabled => self.sample(index).await,
        }
    }

    /// Run the sampler forever.
    ///
    /// Ticks are paced by [`TickPacer`]; ticks that would fire while a read
    /// is still running are dropped. Failed reads are reported to `faults`
    /// and don't stop the loop.
    pub async fn run<const SIZE: usize>(&mut self, faults: FaultSender<'_, B::Error, SIZE>) -> ! {
        let mut pacer = TickPacer::new(Instant::now(), self.timings.tick());

        loop {
            Timer::at(pacer.deadline()).await;

            let slot = self.active;
            if let Err(error) = self.tick().await {
                #[cfg(feature = "log")]
                println!(
                    "sampler: {} sampling failed: {:?}",
                    self.slots[slot].sensor.name, error
                );
                let fault = SampleFault {
                    slot,
                    sensor: self.slots[slot].sensor.name.clone(),
                    error,
                };
                if faults.try_send(fault).is_err() {
                    #[cfg(feature = "log")]
                    println!("sampler: fault queue full, dropping fault");
                }
            }

            let _pace = pacer.complete(Instant::now());
            #[cfg(feature = "log")]
            if _pace.skipped > 0 {
                println!("sampler: tick overran, skipped {} ticks", _pace.skipped);
            }
        }
    }

    /// Read the slot's sensor, publish its color and clean up.
    async fn sample(&mut self, index: usize) -> Result<TickOutcome, SensorError<B::Error>> {
        let published = self.read_and_publish(index).await;
        let restored = self.restore_default(index);

        let (color, led_off) = published?;
        self.advance();
        led_off?;
        restored?;
        Ok(TickOutcome::Sampled { slot: index, color })
    }

    /// Light the object, read it and publish the color.
    ///
    /// The LED is switched off whatever the read result was. After a
    /// successful publish its result is handed back separately.
    async fn read_and_publish(
        &mut self,
        index: usize,
    ) -> Result<(Rgb, Cleanup<B::Error>), SensorError<B::Error>> {
        let mut session = self
            .bus
            .acquire(&self.slots[index].sensor)
            .map_err(SensorError::Acquire)?;

        let published = self
            .illuminated_read(&mut session)
            .await
            .and_then(|raw| {
                let color = normalize(raw, &self.gamma);
                self.publish(index, color).map(|()| color)
            });
        let led_off = session.set_led(false).map_err(SensorError::Led);

        Ok((published?, led_off))
    }

    async fn illuminated_read(
        &mut self,
        session: &mut B::Session,
    ) -> Result<RawReading, SensorError<B::Error>> {
        session.set_led(true).map_err(SensorError::Led)?;
        self.delay.delay_ms(self.timings.settle_ms).await;

        session
            .set_integration_time(self.timings.integration_time_ms)
            .await
            .map_err(SensorError::IntegrationTime)?;
        session.read_raw().await.map_err(SensorError::Read)
    }

    fn publish(&self, index: usize, color: Rgb) -> Result<(), SensorError<B::Error>> {
        self.store
            .set(&self.slots[index].output, StateValue::Color(color))
            .map_err(SensorError::Publish)
    }

    /// Hand the bus context back to the default slot
    fn restore_default(&mut self, index: usize) -> Result<(), SensorError<B::Error>> {
        if index == DEFAULT_SLOT {
            return Ok(());
        }
        self.bus
            .acquire(&self.slots[DEFAULT_SLOT].sensor)
            .map(drop)
            .map_err(SensorError::Acquire)
    }

    const fn advance(&mut self) {
        self.active = (self.active + 1) % SLOT_COUNT;
    }

    /// Slot serviced by the next tick
    pub const fn active_slot(&self) -> usize {
        self.active
    }

    /// Returns if the slot is currently treated as enabled
    pub fn is_slot_enabled(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|slot| slot.enabled)
    }

    /// Path the slot's color is published at
    pub fn output_path(&self, slot: usize) -> Option<&StatePath> {
        self.slots.get(slot).map(|slot| &slot.output)
    }

    /// Sensor configured for the slot
    pub fn sensor(&self, slot: usize) -> Option<&SensorConfig> {
        self.slots.get(slot).map(|slot| &slot.sensor)
    }

    pub const fn gamma(&self) -> &GammaTable {
        &self.gamma
    }

    pub const fn timings(&self) -> &SamplerTimings {
        &self.timings
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<B, P, S, D> Lifecycle for ColorSampler<B, P, S, D>
where
    B: SensorBus,
    P: PinControl,
    S: StateStore,
    D: DelayNs,
{
    type Error = InitError<P::Error>;

    /// Configure the sensor pins and publish black for every sensor.
    fn init(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "log")]
        println!("sampler: init color sensors");

        for slot in &self.slots {
            let sensor = &slot.sensor;
            self.pins
                .configure(&sensor.led_pin, PinMode::Output)
                .map_err(InitError::Pin)?;
            self.pins
                .configure(&sensor.irq_pin, PinMode::Input)
                .map_err(InitError::Pin)?;
            self.pins
                .write(&sensor.led_pin, PinState::Low)
                .map_err(InitError::Pin)?;

            self.store.init_path(&slot.output, StateValue::Color(BLACK))?;
        }

        Ok(())
    }
}
