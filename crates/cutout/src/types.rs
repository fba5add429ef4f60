use std::collections::BTreeMap;

use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{CutoutError, Result};

/// Axis-aligned box in source-image pixel coordinates, as emitted by the
/// detector. Coordinates are fractional and may extend past the image edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Integer box guaranteed to lie fully within the image:
/// `0 <= x1 < x2 <= W` and `0 <= y1 < y2 <= H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampedBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl ClampedBox {
    /// Clamp a detector box to the image bounds, flooring the near corner and
    /// ceiling the far corner so the region never shrinks past a covered
    /// pixel. A box that degenerates to zero area is rejected with
    /// [`CutoutError::EmptyRegion`]; callers skip the instance and continue.
    pub fn clip(bbox: &BoundingBox, image_width: u32, image_height: u32) -> Result<Self> {
        let x1 = bbox.x1.floor().max(0.0) as u32;
        let y1 = bbox.y1.floor().max(0.0) as u32;
        let x2 = (bbox.x2.ceil().max(0.0) as u32).min(image_width);
        let y2 = (bbox.y2.ceil().max(0.0) as u32).min(image_height);

        if x2 <= x1 || y2 <= y1 {
            return Err(CutoutError::EmptyRegion { x1, y1, x2, y2 });
        }

        Ok(Self { x1, y1, x2, y2 })
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// One detected object instance, in detector emission order.
#[derive(Debug, Clone)]
pub struct DetectionInstance {
    pub class_id: u32,
    pub score: f32,
    /// Binary mask at the detector's native resolution, values in {0, 255}.
    pub mask: GrayImage,
    pub bbox: BoundingBox,
}

/// Everything the detector oracle returns for one image.
#[derive(Debug, Clone, Default)]
pub struct DetectionOutput {
    /// class_id -> human-readable class name, as reported by the detector.
    pub class_names: BTreeMap<u32, String>,
    /// Instances in emission order; that order drives artifact naming.
    pub instances: Vec<DetectionInstance>,
}

impl DetectionOutput {
    /// Normalized class name for an instance, or `None` for an id the
    /// detector never declared.
    pub fn class_name(&self, class_id: u32) -> Option<String> {
        self.class_names.get(&class_id).map(|n| normalize_class_name(n))
    }
}

/// Lowercase with spaces replaced by underscores, so detector labels like
/// "Dining Table" become the filesystem-safe "dining_table".
pub fn normalize_class_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// One extracted, named crop+mask pair for a single detected instance.
#[derive(Debug, Clone)]
pub struct ExtractedArtifact {
    /// `{class_name}_{index}` — the join key between extraction and
    /// inpainting.
    pub name: String,
    pub class_name: String,
    /// 1-based, per class, in emission order.
    pub index: u32,
    /// RGBA crop whose alpha channel is the binary mask.
    pub crop: RgbaImage,
    /// Grayscale mask, values in {0, 255}, same dimensions as `crop`.
    pub mask: GrayImage,
    pub source_box: ClampedBox,
}
