// THEORY:
// The `pipeline` module is the top-level API of the drum engine. It strings the
// stages together for one frame:
//
//     RGBA frame -> ColorMask -> median pass -> DetectedObjects
//                -> HitState -> TriggerLatch -> triggered pads
//
// and hands the caller a `FrameReport` describing what happened. Everything that
// touches a device (camera, speakers, window) stays outside; the pipeline is a
// pure function of its input frames plus the latch it owns, which is what lets
// the whole chain be tested with synthetic frames.

use crate::core_modules::blob_detector::blob_detector;
use crate::core_modules::color_mask::ColorMask;
use crate::core_modules::hit_resolver::resolve_hits;
use crate::core_modules::trigger::TriggerLatch;
use crate::core_modules::zone::{BOTTOM_ROW_PADS, ZoneRegistry};
use log::debug;
use std::fmt;

// Re-export key data structures for the public API.
pub use crate::core_modules::color_mask::HsvRange;
pub use crate::core_modules::detected_object::{BoundingBox, DetectedObject, Point};
pub use crate::core_modules::hit_resolver::HitState;
pub use crate::core_modules::pixel::pixel::Hsv;
pub use crate::core_modules::trigger::LatchState;
pub use crate::core_modules::zone::{Zone, ZoneBounds, ZoneId};

pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;
pub const DEFAULT_PAD_HEIGHT: u32 = 100;
pub const DEFAULT_MIN_OBJECT_AREA: usize = 500;
pub const DEFAULT_MEDIAN_KERNEL: u32 = 5;
pub const DEFAULT_TINT_RATIO: f32 = 0.3;

/// Configuration for the DrumPipeline, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct KitConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Height of the bottom pad row and of the crash pad.
    pub pad_height: u32,
    /// The color the tracked object must have.
    pub color_range: HsvRange,
    /// Side of the square median window; must be odd.
    pub median_kernel: u32,
    /// Regions with fewer mask pixels than this are treated as noise.
    pub min_object_area: usize,
    /// Share of the tint color in a struck pad's picture.
    pub tint_ratio: f32,
    /// Struck-pad tint as RGB.
    pub tint_color: [u8; 3],
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            pad_height: DEFAULT_PAD_HEIGHT,
            color_range: HsvRange::blue(),
            median_kernel: DEFAULT_MEDIAN_KERNEL,
            min_object_area: DEFAULT_MIN_OBJECT_AREA,
            tint_ratio: DEFAULT_TINT_RATIO,
            tint_color: [255, 0, 0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyFrame { width: u32, height: u32 },
    FrameTooNarrow { width: u32, min_width: u32 },
    PadTooTall { pad_height: u32, frame_height: u32 },
    EvenKernel(u32),
    TintRatioOutOfRange(f32),
    InvertedColorRange(HsvRange),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyFrame { width, height } => {
                write!(f, "frame size {width}x{height} has no pixels")
            }
            ConfigError::FrameTooNarrow { width, min_width } => write!(
                f,
                "frame width {width} leaves pads with no width, need at least {min_width}"
            ),
            ConfigError::PadTooTall {
                pad_height,
                frame_height,
            } => write!(
                f,
                "pad height {pad_height} does not fit in a frame {frame_height} tall"
            ),
            ConfigError::EvenKernel(size) => {
                write!(f, "median kernel must be odd and non-zero, got {size}")
            }
            ConfigError::TintRatioOutOfRange(ratio) => {
                write!(f, "tint ratio must lie in [0, 1], got {ratio}")
            }
            ConfigError::InvertedColorRange(range) => {
                write!(f, "color range lower bound exceeds upper bound: {range:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl KitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::EmptyFrame {
                width: self.frame_width,
                height: self.frame_height,
            });
        }
        // Every bottom pad, and the quarter-width crash pad, needs a pixel column.
        let min_width = BOTTOM_ROW_PADS.len() as u32;
        if self.frame_width < min_width {
            return Err(ConfigError::FrameTooNarrow {
                width: self.frame_width,
                min_width,
            });
        }
        if self.pad_height == 0 || self.pad_height > self.frame_height {
            return Err(ConfigError::PadTooTall {
                pad_height: self.pad_height,
                frame_height: self.frame_height,
            });
        }
        if self.median_kernel % 2 == 0 {
            return Err(ConfigError::EvenKernel(self.median_kernel));
        }
        if !(0.0..=1.0).contains(&self.tint_ratio) {
            return Err(ConfigError::TintRatioOutOfRange(self.tint_ratio));
        }
        if !self.color_range.is_ordered() {
            return Err(ConfigError::InvertedColorRange(self.color_range));
        }
        Ok(())
    }
}

/// The outcome of processing one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Every object that survived the noise filter.
    pub objects: Vec<DetectedObject>,
    /// Which pads have a centroid inside them this frame.
    pub hits: HitState,
    /// Pads whose sample must start playing now.
    pub triggered: Vec<ZoneId>,
}

/// The main, top-level struct for the drum engine.
pub struct DrumPipeline {
    config: KitConfig,
    registry: ZoneRegistry,
    latch: TriggerLatch,
}

impl DrumPipeline {
    pub fn new(config: KitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry =
            ZoneRegistry::standard(config.frame_width, config.frame_height, config.pad_height);
        Ok(Self::with_registry(config, registry))
    }

    /// Uses a caller-supplied pad layout instead of the standard kit.
    pub fn with_registry(config: KitConfig, registry: ZoneRegistry) -> Self {
        let latch = TriggerLatch::new(registry.len());
        Self {
            config,
            registry,
            latch,
        }
    }

    /// Finds the tracked objects in a tightly packed RGBA frame of the configured size.
    pub fn detect(&self, frame_buffer: &[u8]) -> Vec<DetectedObject> {
        let mask = ColorMask::from_rgba(
            frame_buffer,
            self.config.frame_width,
            self.config.frame_height,
            &self.config.color_range,
        )
        .median_filtered(self.config.median_kernel);
        blob_detector::find_objects(&mask, self.config.min_object_area)
    }

    /// Full per-frame pass: detect, resolve and debounce.
    pub fn process_frame(&mut self, frame_buffer: &[u8]) -> FrameReport {
        let objects = self.detect(frame_buffer);
        self.process_objects(objects)
    }

    /// Resolve and debounce already-detected objects.
    pub fn process_objects(&mut self, objects: Vec<DetectedObject>) -> FrameReport {
        let hits = resolve_hits(&objects, &self.registry);
        let triggered = self.latch.update(&hits);
        for id in &triggered {
            debug!("trigger {}", self.registry.get(*id).name);
        }
        FrameReport {
            objects,
            hits,
            triggered,
        }
    }

    pub fn is_locked(&self, id: ZoneId) -> bool {
        self.latch.is_locked(id)
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }
}
