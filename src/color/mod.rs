mod normalize;
mod raw;

pub use normalize::{Channel, dominant_channel, normalize};
pub use raw::RawReading;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Color published while a sensor has no usable reading
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
