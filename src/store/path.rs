use core::fmt;

use heapless::String;

/// Maximum length of a state path in bytes.
pub const MAX_PATH_LEN: usize = 64;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Error returned when a state path can't be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Path has no segments
    Empty,
    /// Path contains an empty segment (leading, trailing or doubled separator)
    EmptySegment,
    /// Path does not fit into [`MAX_PATH_LEN`] bytes
    TooLong,
}

/// Dotted key path into the shared state, e.g. `inputs.buttons.button_left`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatePath {
    inner: String<MAX_PATH_LEN>,
}

impl StatePath {
    /// Parse a dotted path, rejecting empty segments.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.split(PATH_SEPARATOR).any(str::is_empty) {
            return Err(PathError::EmptySegment);
        }
        let inner = String::try_from(path).map_err(|()| PathError::TooLong)?;
        Ok(Self { inner })
    }

    /// Build a path from individual segments.
    pub fn from_segments(segments: &[&str]) -> Result<Self, PathError> {
        let mut inner = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() || segment.contains(PATH_SEPARATOR) {
                return Err(PathError::EmptySegment);
            }
            if i > 0 {
                inner.push(PATH_SEPARATOR).map_err(|()| PathError::TooLong)?;
            }
            inner.push_str(segment).map_err(|()| PathError::TooLong)?;
        }
        if inner.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { inner })
    }

    /// Append a single segment to the path.
    pub fn join(&self, segment: &str) -> Result<Self, PathError> {
        if segment.is_empty() || segment.contains(PATH_SEPARATOR) {
            return Err(PathError::EmptySegment);
        }
        let mut inner = self.inner.clone();
        inner.push(PATH_SEPARATOR).map_err(|()| PathError::TooLong)?;
        inner.push_str(segment).map_err(|()| PathError::TooLong)?;
        Ok(Self { inner })
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Iterate over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split(PATH_SEPARATOR)
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}
