/// Raw photodiode counts reported by a color sensor.
///
/// `clear` is the unfiltered channel. A zero `clear` count means the
/// sensor saw no light at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawReading {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub clear: u16,
}

impl RawReading {
    pub const fn new(red: u16, green: u16, blue: u16, clear: u16) -> Self {
        Self {
            red,
            green,
            blue,
            clear,
        }
    }

    /// Sum of all four channels
    pub const fn total(self) -> u32 {
        self.red as u32 + self.green as u32 + self.blue as u32 + self.clear as u32
    }

    /// Returns if the sensor reported darkness
    pub const fn is_dark(self) -> bool {
        self.clear == 0
    }
}
