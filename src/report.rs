//! Sensor fault reporting.
//!
//! A failed read doesn't stop the sampler. The fault is pushed into a
//! bounded [`Channel`] that the host drains at its own pace. When the
//! channel is full the newest fault is handed back to the sender.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::config::SensorName;
use crate::sampler::SensorError;

/// A failed sampling attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFault<E> {
    /// Slot that was being sampled
    pub slot: usize,
    /// Name of the sensor in that slot
    pub sensor: SensorName,
    /// What went wrong
    pub error: SensorError<E>,
}

/// Channel carrying sampling faults from the sampler to the host
pub type FaultChannel<E, const SIZE: usize> = Channel<SampleFault<E>, SIZE>;
pub type FaultSender<'a, E, const SIZE: usize> = Sender<'a, SampleFault<E>, SIZE>;
pub type FaultReceiver<'a, E, const SIZE: usize> = Receiver<'a, SampleFault<E>, SIZE>;

/// Value rejected by a full channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

/// Bounded FIFO shared between tasks and interrupt handlers.
///
/// Every access runs inside a critical section.
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the producing side
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Handle for the draining side
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Append a value, handing it back when no slot is free.
    pub fn try_send(&self, value: T) -> Result<(), QueueFull<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(QueueFull)
        })
    }

    /// Oldest queued value, if any
    pub fn try_receive(&self) -> Option<T> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producing side of a [`Channel`]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Clone for Sender<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for Sender<'_, T, SIZE> {}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), QueueFull<T>> {
        self.channel.try_send(value)
    }
}

/// Draining side of a [`Channel`]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Clone for Receiver<'_, T, SIZE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const SIZE: usize> Copy for Receiver<'_, T, SIZE> {}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Option<T> {
        self.channel.try_receive()
    }

    /// Number of values waiting to be drained
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
