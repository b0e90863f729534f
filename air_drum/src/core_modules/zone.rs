// THEORY:
// The `zone` module defines the drum pads: fixed rectangles on screen, each mapped
// to one sound and one picture. The `ZoneRegistry` is built once at startup and
// never changes afterwards.
//
// Key architectural principles:
// 1.  **Integer Handles**: Pads are addressed by `ZoneId`, an index into the
//     registry. Names are only used once, at startup, to resolve assets; every
//     per-frame table (hits, trigger locks, sprites, samples) is a plain `Vec`
//     indexed by `ZoneId`.
// 2.  **Closed Rectangles**: A point on any edge of a pad is inside it. Adjacent
//     pads share their common edge, so a point exactly on it hits both.
// 3.  **Layout Rules, Not Data Files**: The standard kit is derived from the frame
//     size: equal-width pads across the bottom row plus one special pad (the
//     crash cymbal) in the top-left corner.

use crate::core_modules::detected_object::Point;

pub const BOTTOM_ROW_PADS: [&str; 5] = ["Kick", "Snare", "Hi-Hat", "Tom1", "Tom2"];
pub const SPECIAL_PAD: &str = "Crash";

/// Stable handle for a pad, valid for the registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub usize);

impl ZoneId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Pad rectangle with inclusive edges: `(x1, y1)` top-left, `(x2, y2)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneBounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl ZoneBounds {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.x1 <= point.x && point.x <= self.x2 && self.y1 <= point.y && point.y <= self.y2
    }

    /// Pixel width of the pad's picture.
    pub fn width(&self) -> u32 {
        (self.x2 - self.x1) as u32
    }

    /// Pixel height of the pad's picture.
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1) as u32
    }

    pub fn center(&self) -> Point {
        Point::new(self.x1 + (self.x2 - self.x1) / 2, self.y1 + (self.y2 - self.y1) / 2)
    }
}

/// One drum pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub name: String,
    pub bounds: ZoneBounds,
    /// The corner pad (crash cymbal); drawn with its label below centre.
    pub is_special: bool,
}

/// The immutable set of pads for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Builds a registry from explicit zones. Names must be unique.
    pub fn from_zones(zones: Vec<Zone>) -> Self {
        debug_assert!(
            zones
                .iter()
                .enumerate()
                .all(|(i, a)| zones[i + 1..].iter().all(|b| a.name != b.name)),
            "zone names must be unique"
        );
        Self { zones }
    }

    /// The standard kit for a `frame_width` x `frame_height` frame: five pads of
    /// `pad_height` across the bottom and the crash pad, a quarter of the frame
    /// wide, in the top-left corner.
    pub fn standard(frame_width: u32, frame_height: u32, pad_height: u32) -> Self {
        let frame_width = frame_width as i32;
        let frame_height = frame_height as i32;
        let pad_height = pad_height as i32;
        let pad_width = frame_width / BOTTOM_ROW_PADS.len() as i32;

        let mut zones: Vec<Zone> = BOTTOM_ROW_PADS
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let x = index as i32 * pad_width;
                Zone {
                    name: (*name).to_string(),
                    bounds: ZoneBounds::new(x, frame_height - pad_height, x + pad_width, frame_height),
                    is_special: false,
                }
            })
            .collect();

        zones.push(Zone {
            name: SPECIAL_PAD.to_string(),
            bounds: ZoneBounds::new(0, 0, frame_width / 4, pad_height),
            is_special: true,
        });

        Self::from_zones(zones)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    /// Resolves a pad name to its handle.
    pub fn find(&self, name: &str) -> Option<ZoneId> {
        self.zones.iter().position(|zone| zone.name == name).map(ZoneId)
    }

    pub fn ids(&self) -> impl Iterator<Item = ZoneId> + '_ {
        (0..self.zones.len()).map(ZoneId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &Zone)> + '_ {
        self.zones.iter().enumerate().map(|(index, zone)| (ZoneId(index), zone))
    }
}
