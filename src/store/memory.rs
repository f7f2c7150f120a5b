//! Fixed-capacity in-memory state store.
//!
//! Entries live in a `heapless::LinearMap` behind a `critical-section`
//! mutex, so the store can be shared between tasks and interrupt handlers.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::LinearMap;

use super::{StatePath, StateStore, StateValue, StoreFull};

/// In-memory state store with room for `N` paths.
pub struct MemoryStore<const N: usize> {
    inner: Mutex<RefCell<LinearMap<StatePath, StateValue, N>>>,
}

impl<const N: usize> MemoryStore<N> {
    /// Create a new empty store.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(LinearMap::new())),
        }
    }

    /// Remove a path, returning its last value
    pub fn remove(&self, path: &StatePath) -> Option<StateValue> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().remove(path))
    }

    /// Number of stored paths
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for MemoryStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StateStore for MemoryStore<N> {
    fn init_path(&self, path: &StatePath, value: StateValue) -> Result<(), StoreFull> {
        self.set(path, value)
    }

    fn get(&self, path: &StatePath) -> Option<StateValue> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().get(path).copied())
    }

    /// Returns `Err(StoreFull(path))` if the path is new and every entry
    /// is taken.
    fn set(&self, path: &StatePath, value: StateValue) -> Result<(), StoreFull> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .insert(path.clone(), value)
                .map(drop)
                .map_err(|(path, _)| StoreFull(path))
        })
    }
}
