//! Perceptual gamma lookup table.
//!
//! Sensor channels are linear, while displays and the consumers of the
//! published colors expect perceptually corrected values. The table maps a
//! linear 0-255 intensity to `round((i / 255) ^ 2.5 * 255)`.

/// Exponent applied to the normalized intensity.
pub const GAMMA_EXPONENT: f64 = 2.5;

/// Number of entries in the table, one per linear channel value.
pub const GAMMA_TABLE_SIZE: usize = 256;

/// 256-entry gamma lookup table.
///
/// Built once with [`GammaTable::build`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaTable {
    entries: [u8; GAMMA_TABLE_SIZE],
}

impl GammaTable {
    /// Compute every entry of the table.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn build() -> Self {
        let mut entries = [0u8; GAMMA_TABLE_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            let x = i as f64 / 255.0;
            let corrected = libm::pow(x, GAMMA_EXPONENT) * 255.0;
            *entry = libm::round(corrected).clamp(0.0, 255.0) as u8;
        }
        Self { entries }
    }

    /// Corrected value for a linear channel value
    #[inline]
    pub const fn get(&self, linear: u8) -> u8 {
        self.entries[linear as usize]
    }

    /// Corrected value for a fractional linear value.
    ///
    /// The value is floored and clamped to the table range, so slight
    /// floating point overshoot never indexes out of bounds.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lookup(&self, linear: f64) -> u8 {
        let index = libm::floor(linear).clamp(0.0, 255.0);
        self.entries[index as usize]
    }

    /// All entries, indexed by linear value
    pub const fn as_slice(&self) -> &[u8] {
        &self.entries
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::build()
    }
}
