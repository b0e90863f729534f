// THEORY:
// The `BlobDetector` is the engine of the spatial grouping layer. It takes the
// denoised `ColorMask` for a single frame and finds every connected region of
// "on" pixels, then keeps only the regions large enough to be a real object.
//
// Algorithm steps:
// 1.  **Scan for Seeds**: Walk the mask in row-major order. Every "on" pixel that
//     has not been visited yet seeds a new region.
// 2.  **Region Growing**: From the seed, flood outwards with an explicit stack over
//     all 8 neighbours (diagonal contact joins regions, matching how an outer
//     contour would wrap a thin diagonal stroke).
// 3.  **Data Aggregation**: While growing, accumulate the pixel count and the
//     bounding box. No per-pixel list is retained.
// 4.  **Outer Regions Only**: A region that sits entirely inside a hole of
//     another region is not an object of its own. Background reachable from the
//     frame edge (4-connected, the dual of 8-connected foreground) is marked up
//     front; a region survives only if it touches that outside background or the
//     frame edge itself.
// 5.  **Noise Rejection**: Regions whose area is below `min_area` are dropped.
//     Speckle that survives the median pass dies here. Nested regions are
//     discarded before this test, whatever their size.
// 6.  **Stateless Utility**: `find_objects` has no memory of previous frames.

use crate::core_modules::color_mask::ColorMask;
use crate::core_modules::detected_object::{BoundingBox, DetectedObject, Point};

pub mod blob_detector {
    use super::*;

    const EDGE_NEIGHBOURS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

    /// One grown region before filtering.
    struct Region {
        bounding_box: BoundingBox,
        area: usize,
        is_outer: bool,
    }

    /// Finds every outer connected region with at least `min_area` pixels, in the
    /// order their top-most, left-most pixel appears in the mask.
    pub fn find_objects(mask: &ColorMask, min_area: usize) -> Vec<DetectedObject> {
        let outside = outside_background(mask);
        let mut visited = vec![false; mask.bits.len()];
        let mut objects = Vec::new();

        for y in 0..mask.height {
            for x in 0..mask.width {
                let index = (y * mask.width + x) as usize;
                if !mask.bits[index] || visited[index] {
                    continue;
                }

                let region = grow_region(mask, &outside, &mut visited, x, y);
                if region.is_outer && region.area >= min_area {
                    objects.push(DetectedObject::new(region.bounding_box, region.area));
                }
            }
        }

        objects
    }

    /// Marks every "off" pixel 4-connected to the frame edge.
    fn outside_background(mask: &ColorMask) -> Vec<bool> {
        let width = mask.width as i32;
        let height = mask.height as i32;
        let mut outside = vec![false; mask.bits.len()];
        let mut stack: Vec<(i32, i32)> = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let on_edge = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                let index = (y * width + x) as usize;
                if on_edge && !mask.bits[index] && !outside[index] {
                    outside[index] = true;
                    stack.push((x, y));
                }
            }
        }

        while let Some((x, y)) = stack.pop() {
            for (dx, dy) in EDGE_NEIGHBOURS {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                let neighbour = (ny * width + nx) as usize;
                if !mask.bits[neighbour] && !outside[neighbour] {
                    outside[neighbour] = true;
                    stack.push((nx, ny));
                }
            }
        }

        outside
    }

    /// Depth-first flood fill from a seed pixel. Collects the region's bounding
    /// box and pixel count, and whether it borders the outside.
    fn grow_region(
        mask: &ColorMask,
        outside: &[bool],
        visited: &mut [bool],
        seed_x: u32,
        seed_y: u32,
    ) -> Region {
        let width = mask.width as i32;
        let height = mask.height as i32;

        let mut stack: Vec<(i32, i32)> = vec![(seed_x as i32, seed_y as i32)];
        visited[(seed_y * mask.width + seed_x) as usize] = true;

        let mut min_x = seed_x as i32;
        let mut min_y = seed_y as i32;
        let mut max_x = seed_x as i32;
        let mut max_y = seed_y as i32;
        let mut area = 0usize;
        let mut is_outer = false;

        while let Some((x, y)) = stack.pop() {
            area += 1;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            if !is_outer {
                is_outer = EDGE_NEIGHBOURS.iter().any(|(dx, dy)| {
                    let nx = x + dx;
                    let ny = y + dy;
                    nx < 0
                        || ny < 0
                        || nx >= width
                        || ny >= height
                        || outside[(ny * width + nx) as usize]
                });
            }

            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= width || ny >= height {
                        continue;
                    }

                    let neighbour = (ny * width + nx) as usize;
                    if mask.bits[neighbour] && !visited[neighbour] {
                        visited[neighbour] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }

        let bounding_box = BoundingBox {
            top_left: Point::new(min_x, min_y),
            bottom_right: Point::new(max_x, max_y),
        };
        Region {
            bounding_box,
            area,
            is_outer,
        }
    }
}
