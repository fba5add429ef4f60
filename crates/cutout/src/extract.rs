//! Extraction phase: detector output in, named cutout artifacts on disk out.

use std::collections::HashSet;

use image::{RgbImage, imageops};
use tracing::{debug, info, warn};

use crate::error::{CutoutError, Result};
use crate::layout::RunLayout;
use crate::naming::NamingRegistry;
use crate::raster::{self, BINARY_THRESHOLD};
use crate::types::{ClampedBox, DetectionOutput, ExtractedArtifact};

/// Classes extracted when the caller does not supply a list.
pub const DEFAULT_FURNITURE_CLASSES: &[&str] = &[
    "chair",
    "couch",
    "bed",
    "dining_table",
    "tv",
    "laptop",
    "keyboard",
    "refrigerator",
    "oven",
    "toaster",
    "sink",
    "potted_plant",
    "vase",
];

/// Walks detected instances in emission order and turns each allowed one into
/// a persisted crop+mask artifact. Recoverable per-instance failures are
/// logged and skipped; the run keeps going.
pub struct ExtractionOrchestrator {
    allowed_classes: HashSet<String>,
}

impl Default for ExtractionOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_FURNITURE_CLASSES.iter().copied())
    }
}

impl ExtractionOrchestrator {
    pub fn new<I, S>(allowed_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_classes: allowed_classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Extract every allowed instance from `image`, persisting crops and
    /// masks under `layout`. Returns the artifacts in emission order.
    ///
    /// The registry must be fresh for this run; indices continue from
    /// whatever it has already handed out.
    pub fn extract(
        &self,
        image: &RgbImage,
        detections: &DetectionOutput,
        registry: &mut NamingRegistry,
        layout: &RunLayout,
    ) -> Result<Vec<ExtractedArtifact>> {
        let (width, height) = image.dimensions();
        let mut artifacts = Vec::new();
        let mut attempted = 0usize;

        for instance in &detections.instances {
            let Some(class_name) = detections.class_name(instance.class_id) else {
                warn!(class_id = instance.class_id, "detector emitted an undeclared class id");
                continue;
            };
            if !self.allowed_classes.contains(&class_name) {
                debug!(%class_name, "skipping class outside the allowed set");
                continue;
            }
            attempted += 1;

            let region = match ClampedBox::clip(&instance.bbox, width, height) {
                Ok(region) => region,
                Err(err @ CutoutError::EmptyRegion { .. }) => {
                    warn!(%class_name, %err, "skipping instance");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let resized = raster::to_image_resolution(&instance.mask, width, height);
            let crop_mask = raster::crop_and_binarize(&resized, region, BINARY_THRESHOLD);

            let crop = imageops::crop_imm(image, region.x1, region.y1, region.width(), region.height())
                .to_image();
            let crop_mask = raster::match_crop_shape(crop_mask, crop.width(), crop.height());

            let rgba = match raster::composite(&class_name, &crop, &crop_mask) {
                Ok(rgba) => rgba,
                Err(err @ CutoutError::ShapeMismatch { .. }) => {
                    warn!(%class_name, %err, "skipping instance");
                    continue;
                }
                Err(err) => return Err(err),
            };

            let index = registry.next(&class_name);
            let name = format!("{class_name}_{index}");

            rgba.save(layout.crop_path(&name))?;
            crop_mask.save(layout.mask_path(&name))?;
            debug!(%name, ?region, "persisted artifact");

            artifacts.push(ExtractedArtifact {
                name,
                class_name,
                index,
                crop: rgba,
                mask: crop_mask,
                source_box: region,
            });
        }

        info!(
            seen = detections.instances.len(),
            attempted,
            extracted = artifacts.len(),
            "extraction finished"
        );
        Ok(artifacts)
    }
}
