//! The two external model collaborators, as injected traits.
//!
//! The core performs no detection or diffusion math; it treats both models as
//! opaque, expensive functions. Implementations live with the caller (the CLI
//! ships subprocess-backed ones) and are handed to the pipeline explicitly,
//! never reached through globals.

use std::path::Path;

use image::{GrayImage, RgbImage};

use crate::error::Result;
use crate::types::DetectionOutput;

/// Instance-segmentation oracle: image in, per-instance masks, boxes and
/// class labels out.
pub trait Detector: Send + Sync {
    fn detect(&self, image_path: &Path) -> Result<DetectionOutput>;
}

/// Inpainting oracle: RGB image, single-channel region mask and a text prompt
/// in, one replacement RGB image out.
pub trait Inpainter: Send + Sync {
    fn inpaint(&self, image: &RgbImage, mask: &GrayImage, prompt: &str) -> Result<RgbImage>;
}
