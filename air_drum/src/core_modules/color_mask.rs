// THEORY:
// The `ColorMask` is the segmentation stage of the tracker. It turns a full RGBA
// frame into a binary image: a pixel is "on" when its HSV representation falls
// inside the configured `HsvRange`, and "off" otherwise.
//
// Key architectural principles:
// 1.  **Per-Pixel Decision**: Segmentation is a pure function of each pixel's own
//     color (see `Pixel::to_hsv`). No neighbours, no history.
// 2.  **Denoising Pass**: Camera noise produces isolated "on" pixels and pinholes
//     inside real objects. A square median filter fixes both. On a binary image the
//     median is a majority vote over the window, which we evaluate in constant time
//     per pixel with an integral image over a border-replicated copy of the mask.
// 3.  **Dumb Output**: The mask is a plain container. Grouping "on" pixels into
//     objects is the job of the `blob_detector`.

use crate::core_modules::pixel::pixel::{CHANNELS, Hsv, Pixel};

/// An inclusive box in HSV space. A pixel matches when every component lies
/// within `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// The strict blue band used for blue drumsticks and marker caps.
    pub const fn blue() -> Self {
        Self::new(Hsv::new(100, 150, 100), Hsv::new(120, 255, 255))
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower.hue..=self.upper.hue).contains(&hsv.hue)
            && (self.lower.saturation..=self.upper.saturation).contains(&hsv.saturation)
            && (self.lower.value..=self.upper.value).contains(&hsv.value)
    }

    /// True when every lower component is at most its upper counterpart.
    pub fn is_ordered(&self) -> bool {
        self.lower.hue <= self.upper.hue
            && self.lower.saturation <= self.upper.saturation
            && self.lower.value <= self.upper.value
    }
}

/// A binary image the size of the source frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMask {
    pub width: u32,
    pub height: u32,
    /// Row-major, one entry per pixel.
    pub bits: Vec<bool>,
}

impl ColorMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Thresholds a tightly packed RGBA buffer against `range`.
    /// Trailing bytes that do not form a whole pixel are ignored; missing pixels stay off.
    pub fn from_rgba(frame_buffer: &[u8], width: u32, height: u32, range: &HsvRange) -> Self {
        let mut mask = Self::new(width, height);
        for (bit, pixel_bytes) in mask.bits.iter_mut().zip(frame_buffer.chunks_exact(CHANNELS)) {
            *bit = range.contains(Pixel::from(pixel_bytes).to_hsv());
        }
        mask
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        let index = (y * self.width + x) as usize;
        self.bits[index] = on;
    }

    #[cfg(test)]
    fn count_on(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Square median filter with border replication. `kernel_size` must be odd;
    /// a size of 1 (or an empty mask) returns an unchanged copy.
    pub fn median_filtered(&self, kernel_size: u32) -> Self {
        if kernel_size <= 1 || self.bits.is_empty() {
            return self.clone();
        }

        let radius = (kernel_size / 2) as i64;
        let width = self.width as i64;
        let height = self.height as i64;
        let padded_width = width + 2 * radius;
        let padded_height = height + 2 * radius;
        let stride = (padded_width + 1) as usize;

        // integral[(y+1) * stride + (x+1)] = count of "on" in padded[0..=y][0..=x]
        let mut integral = vec![0u32; stride * (padded_height + 1) as usize];
        for padded_y in 0..padded_height {
            let source_y = (padded_y - radius).clamp(0, height - 1);
            let mut row_sum = 0u32;
            for padded_x in 0..padded_width {
                let source_x = (padded_x - radius).clamp(0, width - 1);
                row_sum += self.get(source_x as u32, source_y as u32) as u32;
                let cell = (padded_y as usize + 1) * stride + padded_x as usize + 1;
                integral[cell] = integral[cell - stride] + row_sum;
            }
        }

        let majority = (kernel_size * kernel_size) / 2 + 1;
        let side = kernel_size as usize;
        let mut filtered = Self::new(self.width, self.height);
        for y in 0..height as usize {
            for x in 0..width as usize {
                // Window in padded coordinates spans [x, x + side) x [y, y + side).
                let top_left = y * stride + x;
                let top_right = y * stride + x + side;
                let bottom_left = (y + side) * stride + x;
                let bottom_right = (y + side) * stride + x + side;
                let count = integral[bottom_right] + integral[top_left]
                    - integral[top_right]
                    - integral[bottom_left];
                filtered.bits[y * width as usize + x] = count >= majority;
            }
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_frame(width: u32, height: u32, fill: [u8; 4]) -> Vec<u8> {
        fill.iter()
            .copied()
            .cycle()
            .take((width * height) as usize * CHANNELS)
            .collect()
    }

    fn paint(frame: &mut [u8], width: u32, x: u32, y: u32, color: [u8; 4]) {
        let offset = ((y * width + x) as usize) * CHANNELS;
        frame[offset..offset + CHANNELS].copy_from_slice(&color);
    }

    #[test]
    fn only_in_range_pixels_are_on() {
        let mut frame = rgba_frame(4, 2, [0, 0, 0, 255]);
        paint(&mut frame, 4, 1, 0, [0, 0, 255, 255]);
        paint(&mut frame, 4, 3, 1, [0, 0, 255, 255]);
        paint(&mut frame, 4, 2, 1, [255, 0, 0, 255]);

        let mask = ColorMask::from_rgba(&frame, 4, 2, &HsvRange::blue());
        assert_eq!(mask.count_on(), 2);
        assert!(mask.get(1, 0));
        assert!(mask.get(3, 1));
        assert!(!mask.get(2, 1));
    }

    #[test]
    fn dim_blue_fails_the_value_bound() {
        let frame = rgba_frame(1, 1, [0, 0, 60, 255]);
        let mask = ColorMask::from_rgba(&frame, 1, 1, &HsvRange::blue());
        assert_eq!(mask.count_on(), 0);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = HsvRange::blue();
        assert!(range.contains(Hsv::new(100, 150, 100)));
        assert!(range.contains(Hsv::new(120, 255, 255)));
        assert!(!range.contains(Hsv::new(99, 200, 200)));
        assert!(!range.contains(Hsv::new(121, 200, 200)));
        assert!(!range.contains(Hsv::new(110, 149, 200)));
    }

    #[test]
    fn median_removes_isolated_speckle() {
        let mut mask = ColorMask::new(20, 20);
        mask.set(10, 10, true);
        mask.set(3, 17, true);
        let filtered = mask.median_filtered(5);
        assert_eq!(filtered.count_on(), 0);
    }

    #[test]
    fn median_fills_pinholes_inside_solid_regions() {
        let mut mask = ColorMask::new(20, 20);
        for y in 4..16 {
            for x in 4..16 {
                mask.set(x, y, true);
            }
        }
        mask.set(9, 9, false);
        let filtered = mask.median_filtered(5);
        assert!(filtered.get(9, 9));
    }

    #[test]
    fn median_keeps_a_full_mask_full_at_the_borders() {
        let mut mask = ColorMask::new(8, 6);
        mask.bits.iter_mut().for_each(|bit| *bit = true);
        let filtered = mask.median_filtered(5);
        assert_eq!(filtered.count_on(), 48);
    }

    #[test]
    fn median_rounds_square_corners_but_keeps_extent() {
        let mut mask = ColorMask::new(30, 30);
        for y in 10..20 {
            for x in 10..20 {
                mask.set(x, y, true);
            }
        }
        let filtered = mask.median_filtered(5);
        assert!(!filtered.get(10, 10));
        assert!(filtered.get(14, 10));
        assert!(filtered.get(10, 14));
        assert!(filtered.get(19, 14));
        assert!(filtered.get(14, 19));
    }

    #[test]
    fn kernel_of_one_is_identity() {
        let mut mask = ColorMask::new(3, 3);
        mask.set(1, 1, true);
        assert_eq!(mask.median_filtered(1), mask);
    }
}
