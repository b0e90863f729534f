// THEORY:
// Pad pictures are decorative. A missing or corrupt picture must never stop the
// kit from starting, so loading always produces *some* image of exactly the pad's
// size: the decoded file when it can be read, a black placeholder otherwise.
//
// The struck look (pad tinted towards a solid color) is a pure function of the
// picture, so it is computed here once per pad at startup instead of per frame.

pub mod pad_image {
    use image::imageops::FilterType;
    use image::{Rgb, RgbImage};
    use log::warn;
    use std::path::Path;

    /// A pad picture ready for compositing: 3 channels, pad-sized.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PadImage {
        pub image: RgbImage,
        /// Set when the file could not be used and a blank stand-in was generated.
        pub is_placeholder: bool,
    }

    /// Loads `path`, drops any alpha channel and resizes to exactly
    /// `target_width` x `target_height`. Never fails: unreadable files fall back
    /// to a black placeholder and a warning is logged.
    pub fn load_pad_image(path: &Path, target_width: u32, target_height: u32) -> PadImage {
        match image::open(path) {
            Ok(decoded) => PadImage {
                image: decoded
                    .resize_exact(target_width, target_height, FilterType::Triangle)
                    .to_rgb8(),
                is_placeholder: false,
            },
            Err(error) => {
                warn!("Error loading image at {}: {error}", path.display());
                placeholder(target_width, target_height)
            }
        }
    }

    pub fn placeholder(width: u32, height: u32) -> PadImage {
        PadImage {
            image: RgbImage::from_pixel(width, height, Rgb([0, 0, 0])),
            is_placeholder: true,
        }
    }

    /// Blends every pixel towards `tint`: `image * (1 - ratio) + tint * ratio`,
    /// rounded to the nearest byte. `ratio` is clamped to `[0, 1]`.
    pub fn tinted(image: &RgbImage, tint: Rgb<u8>, ratio: f32) -> RgbImage {
        let ratio = ratio.clamp(0.0, 1.0);
        let keep = 1.0 - ratio;
        let mut blended = image.clone();
        for pixel in blended.pixels_mut() {
            for (channel, tint_channel) in pixel.0.iter_mut().zip(tint.0) {
                let mixed = *channel as f32 * keep + tint_channel as f32 * ratio;
                *channel = mixed.round().clamp(0.0, 255.0) as u8;
            }
        }
        blended
    }
}
