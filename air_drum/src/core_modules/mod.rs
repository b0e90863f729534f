pub mod blob_detector;
pub mod color_mask;
pub mod detected_object;
pub mod hit_resolver;
pub mod pad_image;
pub mod pixel;
pub mod trigger;
pub mod zone;
