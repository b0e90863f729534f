// THEORY:
// Screen layout is data, not drawing. This module says *where* things go on the
// menu, credits and play screens, and in which colors, for a frame of a given
// size. The front-end turns these descriptions into pixels with whatever drawing
// toolkit it uses. Keeping layout here means it is computed from the same frame
// size as the pad registry and can be checked without a window.
//
// Colors are RGB.

use crate::core_modules::detected_object::Point;
use crate::core_modules::zone::Zone;

pub type Rgb = [u8; 3];

pub const BACKGROUND: Rgb = [20, 20, 20];
pub const TITLE_COLOR: Rgb = [255, 255, 0];
pub const TEXT_COLOR: Rgb = [255, 255, 255];
pub const BUTTON_TEXT_COLOR: Rgb = [20, 20, 20];
pub const PLAY_BUTTON_FILL: Rgb = [0, 255, 0];
pub const OTHER_BUTTON_FILL: Rgb = [0, 100, 255];
pub const PAD_LABEL_COLOR: Rgb = [255, 0, 0];
pub const PAD_LABEL_STRUCK_COLOR: Rgb = [0, 0, 0];
pub const MARKER_COLOR: Rgb = [0, 0, 255];
pub const PLACEHOLDER_TEXT_COLOR: Rgb = [255, 255, 0];

pub const TITLE: &str = "AIR DRUM KIT";
pub const CREDITS_TITLE: &str = "CREDITS";
pub const PLAY_INSTRUCTION: &str = "Press 'B' for Menu";
pub const PLACEHOLDER_TEXT: &str = "NO IMAGE";

pub const CREDITS_LINES: [&str; 9] = [
    "AIR DRUM KIT",
    "",
    "Developed by Arian Khademolghorani",
    "Computer Vision: Rust color tracking",
    "Sound Engine: kira",
    "Sound Samples: 99Sounds",
    "Tracking Method: HSV Color Filtering",
    "",
    "Press 'B' to go back to the menu.",
];

const BUTTON_HALF_WIDTH: i32 = 150;
const LABEL_OFFSET: i32 = 30;
const CREDITS_FIRST_LINE_Y: i32 = 120;
const CREDITS_LINE_SPACING: i32 = 40;

/// A filled, bordered menu button with a centred label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: &'static str,
    pub top_left: Point,
    pub bottom_right: Point,
    pub fill: Rgb,
}

/// The three stacked menu buttons, centred horizontally.
pub fn menu_buttons(frame_width: u32, frame_height: u32) -> [MenuButton; 3] {
    let center_x = frame_width as i32 / 2;
    let center_y = frame_height as i32 / 2;
    let button = |label, top: i32, fill| MenuButton {
        label,
        top_left: Point::new(center_x - BUTTON_HALF_WIDTH, center_y + top),
        bottom_right: Point::new(center_x + BUTTON_HALF_WIDTH, center_y + top + 70),
        fill,
    };
    [
        button("PLAY DRUMS (P)", -100, PLAY_BUTTON_FILL),
        button("CREDITS (C)", 10, OTHER_BUTTON_FILL),
        button("EXIT (Q)", 120, OTHER_BUTTON_FILL),
    ]
}

/// Baseline-left anchor of the menu title.
pub fn title_origin(frame_width: u32, frame_height: u32) -> Point {
    Point::new(frame_width as i32 / 2 - 150, frame_height as i32 / 2 - 150)
}

pub fn credits_title_origin(frame_width: u32) -> Point {
    Point::new(frame_width as i32 / 2 - 100, 50)
}

/// Baseline-left anchors for each credits line, in order.
pub fn credits_line_origins(frame_width: u32) -> impl Iterator<Item = (Point, &'static str)> {
    let x = frame_width as i32 / 4;
    CREDITS_LINES
        .iter()
        .enumerate()
        .map(move |(index, line)| {
            (
                Point::new(x, CREDITS_FIRST_LINE_Y + index as i32 * CREDITS_LINE_SPACING),
                *line,
            )
        })
}

/// Baseline-left anchor for a pad label of `text_width` pixels: centred
/// horizontally, above the pad centre for bottom pads and below it for the
/// special pad.
pub fn pad_label_origin(zone: &Zone, text_width: i32) -> Point {
    let center = zone.bounds.center();
    let y = if zone.is_special {
        center.y + LABEL_OFFSET
    } else {
        center.y - LABEL_OFFSET
    };
    Point::new(center.x - text_width / 2, y)
}

pub fn pad_label_color(is_struck: bool) -> Rgb {
    if is_struck {
        PAD_LABEL_STRUCK_COLOR
    } else {
        PAD_LABEL_COLOR
    }
}
