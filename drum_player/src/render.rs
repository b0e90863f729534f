use air_drum::core_modules::pad_image::pad_image::{PadImage, tinted};
use air_drum::pipeline::{DetectedObject, DrumPipeline, KitConfig};
use air_drum::screens::{self, Rgb};
use image::RgbImage;
use opencv::{
    core::{self, Mat, Rect, Scalar},
    imgproc,
    prelude::*,
};

const FONT: i32 = imgproc::FONT_HERSHEY_SIMPLEX;
const MARKER_RADIUS: i32 = 5;

/// A pad picture pre-converted to the frame's BGR byte layout, in both its
/// resting and struck looks.
pub struct PadSprite {
    width: u32,
    height: u32,
    resting: Vec<u8>,
    struck: Vec<u8>,
}

impl PadSprite {
    /// Placeholders get their "NO IMAGE" caption stamped in before tinting, so
    /// a struck placeholder tints the caption along with the rest.
    pub fn new(pad: &PadImage, config: &KitConfig) -> opencv::Result<Self> {
        let picture = if pad.is_placeholder {
            captioned_placeholder(pad.image.width(), pad.image.height())?
        } else {
            pad.image.clone()
        };
        let tint = image::Rgb(config.tint_color);
        Ok(Self {
            width: picture.width(),
            height: picture.height(),
            resting: to_bgr_bytes(&picture),
            struck: to_bgr_bytes(&tinted(&picture, tint, config.tint_ratio)),
        })
    }
}

/// A black picture with the placeholder caption roughly centred.
fn captioned_placeholder(width: u32, height: u32) -> opencv::Result<RgbImage> {
    let mut canvas = Mat::new_rows_cols_with_default(
        height as i32,
        width as i32,
        core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    let origin = core::Point::new(width as i32 / 2 - 50, height as i32 / 2 + 5);
    put_text(
        &mut canvas,
        screens::PLACEHOLDER_TEXT,
        origin,
        0.5,
        screens::PLACEHOLDER_TEXT_COLOR,
        1,
    )?;

    let bytes = canvas.data_bytes()?;
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let index = (y * width + x) as usize * 3;
        image::Rgb([bytes[index + 2], bytes[index + 1], bytes[index]])
    }))
}

fn to_bgr_bytes(image: &RgbImage) -> Vec<u8> {
    image
        .pixels()
        .flat_map(|pixel| [pixel.0[2], pixel.0[1], pixel.0[0]])
        .collect()
}

fn color(rgb: Rgb) -> Scalar {
    Scalar::new(rgb[2] as f64, rgb[1] as f64, rgb[0] as f64, 0.0)
}

fn cv_point(point: air_drum::pipeline::Point) -> core::Point {
    core::Point::new(point.x, point.y)
}

fn put_text(
    frame: &mut Mat,
    text: &str,
    origin: core::Point,
    scale: f64,
    rgb: Rgb,
    thickness: i32,
) -> opencv::Result<()> {
    imgproc::put_text(
        frame,
        text,
        origin,
        FONT,
        scale,
        color(rgb),
        thickness,
        imgproc::LINE_8,
        false,
    )
}

fn text_width(text: &str, scale: f64, thickness: i32) -> opencv::Result<i32> {
    let mut baseline = 0;
    Ok(imgproc::get_text_size(text, FONT, scale, thickness, &mut baseline)?.width)
}

fn fill_background(frame: &mut Mat) -> opencv::Result<()> {
    let full = Rect::new(0, 0, frame.cols(), frame.rows());
    imgproc::rectangle(frame, full, color(screens::BACKGROUND), -1, imgproc::LINE_8, 0)
}

/// Copies a tightly packed BGR block onto the frame at `(x, y)`, clipped to the
/// frame edges.
fn blit(frame: &mut Mat, pixels: &[u8], width: u32, height: u32, x: i32, y: i32) -> opencv::Result<()> {
    let frame_width = frame.cols();
    let frame_height = frame.rows();
    let start_x = x.max(0);
    let end_x = (x + width as i32).min(frame_width);
    if start_x >= end_x {
        return Ok(());
    }

    let bytes = frame.data_bytes_mut()?;
    let row_len = width as usize * 3;
    let span = (end_x - start_x) as usize * 3;
    for row in 0..height as i32 {
        let frame_y = y + row;
        if frame_y < 0 || frame_y >= frame_height {
            continue;
        }
        let source = row as usize * row_len + (start_x - x) as usize * 3;
        let target = (frame_y * frame_width + start_x) as usize * 3;
        bytes[target..target + span].copy_from_slice(&pixels[source..source + span]);
    }
    Ok(())
}

pub fn draw_menu(frame: &mut Mat, frame_width: u32, frame_height: u32) -> opencv::Result<()> {
    fill_background(frame)?;
    put_text(
        frame,
        screens::TITLE,
        cv_point(screens::title_origin(frame_width, frame_height)),
        1.5,
        screens::TITLE_COLOR,
        3,
    )?;

    for button in screens::menu_buttons(frame_width, frame_height) {
        let rect = Rect::from_points(cv_point(button.top_left), cv_point(button.bottom_right));
        imgproc::rectangle(frame, rect, color(button.fill), -1, imgproc::LINE_8, 0)?;
        imgproc::rectangle(frame, rect, color(screens::TEXT_COLOR), 3, imgproc::LINE_8, 0)?;

        let label_width = text_width(button.label, 1.0, 2)?;
        let label_x = button.top_left.x + (button.bottom_right.x - button.top_left.x) / 2
            - label_width / 2;
        let label_origin = core::Point::new(label_x, button.bottom_right.y - 25);
        put_text(frame, button.label, label_origin, 1.0, screens::BUTTON_TEXT_COLOR, 2)?;
    }
    Ok(())
}

pub fn draw_credits(frame: &mut Mat, frame_width: u32) -> opencv::Result<()> {
    fill_background(frame)?;
    put_text(
        frame,
        screens::CREDITS_TITLE,
        cv_point(screens::credits_title_origin(frame_width)),
        1.2,
        screens::TITLE_COLOR,
        3,
    )?;
    for (origin, line) in screens::credits_line_origins(frame_width) {
        put_text(frame, line, cv_point(origin), 0.7, screens::TEXT_COLOR, 2)?;
    }
    Ok(())
}

/// Pads (tinted while locked), labels, object markers and the instruction line.
pub fn draw_play(
    frame: &mut Mat,
    pipeline: &DrumPipeline,
    sprites: &[PadSprite],
    objects: &[DetectedObject],
) -> opencv::Result<()> {
    for ((id, zone), sprite) in pipeline.registry().iter().zip(sprites) {
        let is_struck = pipeline.is_locked(id);
        let pixels = if is_struck {
            &sprite.struck
        } else {
            &sprite.resting
        };
        let (x, y) = (zone.bounds.x1, zone.bounds.y1);
        blit(frame, pixels, sprite.width, sprite.height, x, y)?;

        let label_width = text_width(&zone.name, 1.0, 2)?;
        let origin = cv_point(screens::pad_label_origin(zone, label_width));
        put_text(frame, &zone.name, origin, 1.0, screens::pad_label_color(is_struck), 2)?;
    }

    for object in objects {
        imgproc::circle(
            frame,
            cv_point(object.centroid),
            MARKER_RADIUS,
            color(screens::MARKER_COLOR),
            -1,
            imgproc::LINE_8,
            0,
        )?;
    }

    put_text(
        frame,
        screens::PLAY_INSTRUCTION,
        core::Point::new(10, 20),
        0.5,
        screens::TEXT_COLOR,
        2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_drum::core_modules::pad_image::pad_image::placeholder;

    #[test]
    fn bgr_bytes_swap_red_and_blue() {
        let image = RgbImage::from_pixel(1, 1, image::Rgb([1, 2, 3]));
        assert_eq!(to_bgr_bytes(&image), vec![3, 2, 1]);
    }

    #[test]
    fn struck_sprite_is_the_tinted_picture_in_bgr() {
        let config = KitConfig::default();
        let pad = PadImage {
            image: RgbImage::from_pixel(4, 2, image::Rgb([100, 100, 100])),
            is_placeholder: false,
        };
        let sprite = PadSprite::new(&pad, &config).unwrap();

        let expected = tinted(&pad.image, image::Rgb(config.tint_color), config.tint_ratio);
        assert_eq!(sprite.struck, to_bgr_bytes(&expected));
        assert_eq!(sprite.resting, to_bgr_bytes(&pad.image));
        // Red ends up in the last byte of each BGR triple.
        assert!(sprite.struck[2] > sprite.struck[0]);
        assert_eq!((sprite.width, sprite.height), (4, 2));
    }

    #[test]
    fn placeholder_caption_is_tinted_with_the_pad() {
        let config = KitConfig::default();
        let pad = placeholder(128, 100);
        let sprite = PadSprite::new(&pad, &config).unwrap();

        let caption = captioned_placeholder(128, 100).unwrap();
        assert!(caption.pixels().any(|pixel| pixel.0 != [0, 0, 0]));
        assert_eq!(sprite.resting, to_bgr_bytes(&caption));

        let expected = tinted(&caption, image::Rgb(config.tint_color), config.tint_ratio);
        assert_eq!(sprite.struck, to_bgr_bytes(&expected));
    }
}
