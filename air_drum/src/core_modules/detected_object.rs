// THEORY:
// A `DetectedObject` is the output of the spatial grouping stage: one connected
// region of in-range pixels that survived the noise filter, summarised by its
// bounding box, centroid and area.
//
// Key architectural principles:
// 1.  **Transient**: Objects live for exactly one frame. There is no identity
//     across frames and no tracking; each frame is judged on its own.
// 2.  **Stateless Data Container**: Like `Pixel` and `ColorMask`, this is a plain
//     value. Deciding which pads an object touches belongs to the `hit_resolver`.
// 3.  **Centroid = Box Centre**: The centroid is the centre of the bounding box,
//     which is stable for the compact blobs a drumstick tip produces.

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle given by its inclusive top-left and bottom-right
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.bottom_right.x - self.top_left.x + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom_right.y - self.top_left.y + 1
    }

    /// Centre of the box, rounded towards the top-left.
    pub fn center(&self) -> Point {
        Point::new(
            self.top_left.x + self.width() / 2,
            self.top_left.y + self.height() / 2,
        )
    }
}

/// Represents a single colored object found in the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    /// The rectangle that encloses every pixel of the region.
    pub bounding_box: BoundingBox,
    /// The point tested against the drum pads.
    pub centroid: Point,
    /// Number of mask pixels in the region.
    pub area: usize,
}

impl DetectedObject {
    pub fn new(bounding_box: BoundingBox, area: usize) -> Self {
        Self {
            bounding_box,
            centroid: bounding_box.center(),
            area,
        }
    }

    /// An object known only by its centroid, for driving the resolver directly.
    pub fn at(x: i32, y: i32) -> Self {
        let point = Point::new(x, y);
        Self {
            bounding_box: BoundingBox {
                top_left: point,
                bottom_right: point,
            },
            centroid: point,
            area: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_even_box_rounds_down_from_the_middle() {
        let bounding_box = BoundingBox {
            top_left: Point::new(100, 100),
            bottom_right: Point::new(139, 139),
        };
        assert_eq!(bounding_box.width(), 40);
        assert_eq!(bounding_box.center(), Point::new(120, 120));
    }

    #[test]
    fn single_pixel_box_is_its_own_center() {
        let object = DetectedObject::at(7, 9);
        assert_eq!(object.bounding_box.width(), 1);
        assert_eq!(object.centroid, Point::new(7, 9));
    }
}
