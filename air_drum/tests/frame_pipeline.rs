use air_drum::pipeline::{DrumPipeline, KitConfig, Point, ZoneId};
use air_drum::session::{AppSession, AppState, LoopControl};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const BLUE: [u8; 4] = [20, 60, 220, 255];
const RED: [u8; 4] = [220, 30, 30, 255];

fn blank_frame() -> Vec<u8> {
    [15u8, 15, 15, 255]
        .iter()
        .copied()
        .cycle()
        .take((WIDTH * HEIGHT * 4) as usize)
        .collect()
}

fn paint_square(frame: &mut [u8], x0: u32, y0: u32, side: u32, color: [u8; 4]) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            let offset = ((y * WIDTH + x) * 4) as usize;
            frame[offset..offset + 4].copy_from_slice(&color);
        }
    }
}

fn frame_with_squares(squares: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut frame = blank_frame();
    for &(x, y, side) in squares {
        paint_square(&mut frame, x, y, side, BLUE);
    }
    frame
}

fn pipeline() -> DrumPipeline {
    DrumPipeline::new(KitConfig::default()).expect("default config is valid")
}

fn zone(pipeline: &DrumPipeline, name: &str) -> ZoneId {
    pipeline.registry().find(name).expect("standard pad")
}

#[test]
fn empty_scene_detects_nothing_and_hits_nothing() {
    let mut pipeline = pipeline();
    let report = pipeline.process_frame(&blank_frame());
    assert!(report.objects.is_empty());
    assert!(!report.hits.any());
    assert!(report.triggered.is_empty());
}

#[test]
fn blue_square_is_located_at_its_center() {
    let pipeline = pipeline();
    let objects = pipeline.detect(&frame_with_squares(&[(300, 200, 40)]));
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].centroid, Point::new(320, 220));
    assert!(objects[0].area > 1500);
}

#[test]
fn other_colors_are_ignored() {
    let pipeline = pipeline();
    let mut frame = blank_frame();
    paint_square(&mut frame, 170, 400, 40, RED);
    assert!(pipeline.detect(&frame).is_empty());
}

#[test]
fn holding_a_stick_on_a_pad_fires_once_then_rearms_after_leaving() {
    let mut pipeline = pipeline();
    let snare = zone(&pipeline, "Snare");
    let on_snare = frame_with_squares(&[(170, 400, 40)]);
    let empty = blank_frame();

    let mut fired = Vec::new();
    for _ in 0..6 {
        fired.extend(pipeline.process_frame(&on_snare).triggered);
    }
    assert_eq!(fired, vec![snare]);
    assert!(pipeline.is_locked(snare));

    let report = pipeline.process_frame(&empty);
    assert!(report.triggered.is_empty());
    assert!(!pipeline.is_locked(snare));

    for _ in 0..3 {
        fired.extend(pipeline.process_frame(&on_snare).triggered);
    }
    assert_eq!(fired, vec![snare, snare]);
}

#[test]
fn two_sticks_on_two_pads_fire_both_in_the_same_frame() {
    let mut pipeline = pipeline();
    let kick = zone(&pipeline, "Kick");
    let crash = zone(&pipeline, "Crash");
    let frame = frame_with_squares(&[(20, 400, 40), (60, 30, 40)]);

    let report = pipeline.process_frame(&frame);
    assert_eq!(report.objects.len(), 2);
    assert_eq!(report.triggered, vec![kick, crash]);

    let report = pipeline.process_frame(&frame);
    assert!(report.triggered.is_empty());
    assert!(report.hits.is_hit(kick) && report.hits.is_hit(crash));
}

#[test]
fn blobs_under_the_area_threshold_never_hit() {
    let mut pipeline = pipeline();
    let frame = frame_with_squares(&[(170, 400, 20)]);
    let report = pipeline.process_frame(&frame);
    assert!(report.objects.is_empty());
    assert!(!report.hits.any());
    assert!(report.triggered.is_empty());
}

#[test]
fn object_between_pads_is_tracked_but_silent() {
    let mut pipeline = pipeline();
    let report = pipeline.process_frame(&frame_with_squares(&[(400, 200, 40)]));
    assert_eq!(report.objects.len(), 1);
    assert!(!report.hits.any());
}

#[test]
fn session_only_tracks_once_play_is_selected() {
    let mut session = AppSession::new(KitConfig::default()).expect("valid config");
    assert!(matches!(session.state(), AppState::Menu { .. }));
    assert_eq!(session.handle_key('p' as i32), LoopControl::Continue);
    assert_eq!(session.state(), AppState::Play);

    let report = session.process_frame(&frame_with_squares(&[(300, 400, 40)]));
    let hi_hat = session.pipeline().registry().find("Hi-Hat").unwrap();
    assert_eq!(report.triggered, vec![hi_hat]);
}
