//! Raw reading to display color conversion
//!
//! Each channel is first expressed as its share of the total light, then
//! the whole triple is scaled so the dominant channel reaches full scale,
//! and finally passed through the gamma table. The result keeps the hue of
//! the measured surface while using the full output range.

use super::{BLACK, RawReading, Rgb};
use crate::gamma::GammaTable;

/// Scale applied to the channel shares before interpolation
const SHARE_SCALE: f64 = 256.0;

/// Value the dominant channel is stretched to
const FULL_SCALE: f64 = 255.0;

/// Color channel of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Pick the channel with the largest value.
///
/// Ties go to red first, then green.
pub fn dominant_channel(red: f64, green: f64, blue: f64) -> Channel {
    if red >= green && red >= blue {
        Channel::Red
    } else if green >= blue {
        Channel::Green
    } else {
        Channel::Blue
    }
}

/// Convert a raw reading into a gamma corrected color.
///
/// Returns black when the sensor reports darkness or when no color channel
/// carries any light.
pub fn normalize(raw: RawReading, table: &GammaTable) -> Rgb {
    if raw.is_dark() {
        return BLACK;
    }

    let sum = f64::from(raw.total());
    let share = |value: u16| (f64::from(value) / sum * SHARE_SCALE).max(0.0);
    let red = share(raw.red);
    let green = share(raw.green);
    let blue = share(raw.blue);

    let dominant = match dominant_channel(red, green, blue) {
        Channel::Red => red,
        Channel::Green => green,
        Channel::Blue => blue,
    };
    if dominant <= 0.0 {
        return BLACK;
    }

    // Dividing by the dominant value first keeps the dominant channel at
    // exactly full scale.
    let stretch = |value: f64| value / dominant * FULL_SCALE;

    Rgb {
        r: table.lookup(stretch(red)),
        g: table.lookup(stretch(green)),
        b: table.lookup(stretch(blue)),
    }
}
