// THEORY (Single-Pixel Color Model):
// The `Pixel` module is the most fundamental unit of the tracker. It is a "dumb"
// data container for one RGBA pixel plus the single-pixel transform the rest of
// the engine is built on: conversion into the hue/saturation/value model.
//
// Why HSV?
// - A colored drumstick keeps roughly the same hue as it moves between shadow and
//   light, while its raw RGB values swing wildly. Thresholding on hue with loose
//   saturation/value bounds is far more robust to room lighting than RGB ranges.
//
// Scale conventions (8-bit HSV, the scale used by most camera tooling):
// - hue:        0..180 (degrees halved so the angle fits in a byte)
// - saturation: 0..255 (chroma / value)
// - value:      0..255 (max channel)
//
// Key principles:
// 1) Single-pixel scope: nothing here reads neighbours or history.
// 2) Integer in, integer out: the mask stage compares bytes against byte bounds.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Hue = u8;
    pub type Saturation = u8;
    pub type Value = u8;

    pub const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255). Ignored by the color model.
        pub alpha: Channel,
    }

    /// A pixel expressed in 8-bit hue/saturation/value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Hsv {
        pub hue: Hue,
        pub saturation: Saturation,
        pub value: Value,
    }

    impl Hsv {
        pub const fn new(hue: Hue, saturation: Saturation, value: Value) -> Self {
            Self {
                hue,
                saturation,
                value,
            }
        }
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// Converts to 8-bit HSV.
        ///
        /// - Value is the largest channel.
        /// - Saturation is chroma scaled by value; zero for black.
        /// - Hue is the color-wheel angle halved; zero for grays. Ties between
        ///   channels resolve red, then green, then blue.
        pub fn to_hsv(&self) -> Hsv {
            let red = self.red as i32;
            let green = self.green as i32;
            let blue = self.blue as i32;

            let maximum_channel = red.max(green.max(blue));
            let minimum_channel = red.min(green.min(blue));
            let chroma = maximum_channel - minimum_channel;

            let saturation = if maximum_channel == 0 {
                0
            } else {
                (chroma as f32 * 255.0 / maximum_channel as f32).round() as i32
            };

            if chroma == 0 {
                return Hsv::new(0, saturation as u8, maximum_channel as u8);
            }

            let (base_difference, sector_offset) = if maximum_channel == red {
                (green - blue, 0.0)
            } else if maximum_channel == green {
                (blue - red, 120.0)
            } else {
                (red - green, 240.0)
            };

            let mut hue_degrees = sector_offset + 60.0 * base_difference as f32 / chroma as f32;
            if hue_degrees < 0.0 {
                hue_degrees += 360.0;
            }
            // 359.x degrees rounds to 180, which wraps back to red.
            let hue = ((hue_degrees / 2.0).round() as i32) % 180;

            Hsv::new(hue as u8, saturation as u8, maximum_channel as u8)
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }
}


// -----------------------------------------------------------------------------
// Glossary: Single-Pixel Color Terms
//
// - Hue: Angle on the color wheel describing the "color family". Stored halved
//   (0..180) so it fits a byte.
//
// - Chroma: max(R,G,B) - min(R,G,B). Zero for perfect grays.
//
// - Saturation (HSV): Chroma divided by Value, scaled to 0..255. Drops to zero near
//   black even if hue is well-defined.
//
// - Value (HSV): Brightness defined as the maximum of the RGB channels.
