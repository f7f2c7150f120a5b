//! Shared keyed state
//!
//! The sampler publishes colors into, and reads enable flags from, a state
//! store owned by the host. Only the narrow [`StateStore`] port is required;
//! [`MemoryStore`] is a fixed-capacity implementation for hosts without
//! their own store.

mod memory;
mod path;

pub use memory::MemoryStore;
pub use path::{MAX_PATH_LEN, PATH_SEPARATOR, PathError, StatePath};

use crate::color::Rgb;

/// Error returned when a new path doesn't fit into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFull(pub StatePath);

/// Value stored at a state path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateValue {
    /// Boolean flag, e.g. a button state used as enable signal
    Flag(bool),
    /// Published color triple
    Color(Rgb),
}

impl StateValue {
    /// Returns the flag value, `None` for non-flag values
    pub const fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(value),
            Self::Color(_) => None,
        }
    }

    /// Returns the color value, `None` for non-color values
    pub const fn as_color(self) -> Option<Rgb> {
        match self {
            Self::Color(color) => Some(color),
            Self::Flag(_) => None,
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Rgb> for StateValue {
    fn from(value: Rgb) -> Self {
        Self::Color(value)
    }
}

/// Port to the host's shared state.
///
/// Writes replace the whole value at a path at once; readers never observe
/// a partially written color. A write fails with [`StoreFull`] when the
/// path is new and the store can't take another entry.
pub trait StateStore {
    /// Declare a path with its initial value
    fn init_path(&self, path: &StatePath, value: StateValue) -> Result<(), StoreFull>;

    /// Read the current value at a path
    fn get(&self, path: &StatePath) -> Option<StateValue>;

    /// Replace the value at a path
    fn set(&self, path: &StatePath, value: StateValue) -> Result<(), StoreFull>;

    /// Read a path as an enable signal.
    ///
    /// Missing paths and non-flag values read as disabled.
    fn is_enabled(&self, path: &StatePath) -> bool {
        self.get(path).and_then(StateValue::as_flag).unwrap_or(false)
    }
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn init_path(&self, path: &StatePath, value: StateValue) -> Result<(), StoreFull> {
        (**self).init_path(path, value)
    }

    fn get(&self, path: &StatePath) -> Option<StateValue> {
        (**self).get(path)
    }

    fn set(&self, path: &StatePath, value: StateValue) -> Result<(), StoreFull> {
        (**self).set(path, value)
    }
}
