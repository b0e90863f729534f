mod assets;
mod audio;
mod render;

use std::path::PathBuf;

use air_drum::core_modules::pad_image::pad_image::load_pad_image;
use air_drum::pipeline::{
    DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_MIN_OBJECT_AREA, KitConfig,
};
use air_drum::session::{AppSession, AppState, LoopControl};
use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{error, info};
use opencv::{
    core::{self, Mat},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};

use audio::DrumSamples;
use render::PadSprite;

const WINDOW_NAME: &str = "Air Drum Kit";

#[derive(Parser, Debug)]
#[command(
    name = "air_drum_kit",
    about = "Play a drum kit in the air with a blue stick in front of your webcam"
)]
struct Args {
    /// Index of the camera device to capture from.
    #[arg(long, default_value_t = 0)]
    camera: i32,

    /// Directory holding the `Samples/` and `images/` folders.
    #[arg(long, env = "AIR_DRUM_ASSETS", default_value = "assets")]
    assets: PathBuf,

    /// Capture and window width in pixels.
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
    width: u32,

    /// Capture and window height in pixels.
    #[arg(long, default_value_t = DEFAULT_FRAME_HEIGHT)]
    height: u32,

    /// Smallest colored region, in pixels, that counts as a stick.
    #[arg(long, default_value_t = DEFAULT_MIN_OBJECT_AREA)]
    min_area: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!(
        "air drum kit starting: camera {}, {}x{}, assets in {}",
        args.camera,
        args.width,
        args.height,
        args.assets.display()
    );
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    // --- 1. Session & Assets ---
    let config = KitConfig {
        frame_width: args.width,
        frame_height: args.height,
        min_object_area: args.min_area,
        ..KitConfig::default()
    };
    let mut session = AppSession::new(config.clone()).context("Invalid kit configuration")?;

    let registry = session.pipeline().registry();
    let paths = assets::resolve(registry, &args.assets)?;
    let mut samples = DrumSamples::load(&paths.samples)?;
    let sprites = registry
        .iter()
        .zip(&paths.images)
        .map(|((_, zone), path)| {
            let pad = load_pad_image(path, zone.bounds.width(), zone.bounds.height());
            PadSprite::new(&pad, &config)
        })
        .collect::<opencv::Result<Vec<PadSprite>>>()
        .context("Failed to prepare pad pictures")?;

    // --- 2. Camera & Window ---
    let mut camera = VideoCapture::new(args.camera, videoio::CAP_ANY)?;
    if !camera.is_opened()? {
        bail!("Error opening camera {}", args.camera);
    }
    camera.set(videoio::CAP_PROP_FRAME_WIDTH, args.width as f64)?;
    camera.set(videoio::CAP_PROP_FRAME_HEIGHT, args.height as f64)?;

    highgui::named_window(WINDOW_NAME, highgui::WINDOW_NORMAL)?;
    highgui::resize_window(WINDOW_NAME, args.width as i32, args.height as i32)?;

    // --- 3. Main Loop ---
    let outcome = frame_loop(&mut camera, &mut session, &mut samples, &sprites, args);

    // --- 4. Cleanup ---
    camera.release()?;
    highgui::destroy_all_windows()?;
    info!("air drum kit stopped");
    outcome
}

fn frame_loop(
    camera: &mut VideoCapture,
    session: &mut AppSession,
    samples: &mut DrumSamples,
    sprites: &[PadSprite],
    args: &Args,
) -> Result<()> {
    let mut captured = Mat::default();
    loop {
        if !camera.read(&mut captured)? || captured.empty() {
            error!("Could not read a frame from camera {}", args.camera);
            return Ok(());
        }

        // Mirror so the stick moves the way the player does.
        let mut mirrored = Mat::default();
        core::flip(&captured, &mut mirrored, 1)?;
        let mut frame = fit_to_size(mirrored, args.width, args.height)?;

        match session.state() {
            AppState::Menu {
                showing_credits: true,
            } => render::draw_credits(&mut frame, args.width)?,
            AppState::Menu { .. } => render::draw_menu(&mut frame, args.width, args.height)?,
            AppState::Play => {
                // The engine wants RGBA, the camera gives BGR.
                let mut rgba_frame = Mat::default();
                imgproc::cvt_color(&frame, &mut rgba_frame, imgproc::COLOR_BGR2RGBA, 0)?;
                let report = session.process_frame(rgba_frame.data_bytes()?);

                for id in &report.triggered {
                    samples.trigger(*id);
                }
                render::draw_play(&mut frame, session.pipeline(), sprites, &report.objects)?;
            }
        }

        if session.handle_key(highgui::wait_key(1)?) == LoopControl::Quit {
            return Ok(());
        }

        highgui::imshow(WINDOW_NAME, &frame)?;
    }
}

/// Devices may ignore the requested resolution; pad geometry assumes it.
fn fit_to_size(frame: Mat, width: u32, height: u32) -> opencv::Result<Mat> {
    let size = frame.size()?;
    if size.width == width as i32 && size.height == height as i32 {
        return Ok(frame);
    }
    let mut resized = Mat::default();
    imgproc::resize(
        &frame,
        &mut resized,
        core::Size::new(width as i32, height as i32),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;
    Ok(resized)
}
