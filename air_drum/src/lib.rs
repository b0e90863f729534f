// THEORY:
// This file is the main entry point for the `air_drum` library crate. It exposes
// the drum engine as a small public API for front-ends (like the `drum_player`
// binary) that own the camera, the speakers and the window.
//
// The primary exports are the `DrumPipeline` and its data structures
// (`KitConfig`, `FrameReport`, `ZoneId`, ...) in `pipeline`, the `AppSession`
// screen state machine in `session`, and the screen layout data in `screens`.
// The per-stage building blocks live in `core_modules`.

pub mod core_modules;
pub mod pipeline;
pub mod screens;
pub mod session;
