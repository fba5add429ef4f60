pub mod builder;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cleaning::MaskCleaner;
use crate::error::{CutoutError, Result};
use crate::extract::ExtractionOrchestrator;
use crate::inpaint::{InpaintOrchestrator, InpaintResult};
use crate::layout::RunLayout;
use crate::naming::NamingRegistry;
use crate::oracle::Detector;

/// What one run produced, for callers that want more than log lines:
/// attempted vs. succeeded counts plus the named outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub base_dir: PathBuf,
    pub instances_seen: usize,
    pub extracted: Vec<String>,
    pub inpainted: Vec<InpaintResult>,
}

/// The whole extraction-to-inpaint pipeline for one image.
///
/// Both oracles are injected; the pipeline owns no model state of its own and
/// a fresh [`NamingRegistry`] is created per run. Stages run strictly in
/// sequence and artifacts keep detector emission order throughout.
pub struct CutoutPipeline {
    detector: Box<dyn Detector>,
    extractor: ExtractionOrchestrator,
    cleaner: MaskCleaner,
    inpainter: InpaintOrchestrator,
}

impl CutoutPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> builder::CutoutPipelineBuilder {
        builder::CutoutPipelineBuilder::new()
    }

    pub(crate) fn new(
        detector: Box<dyn Detector>,
        extractor: ExtractionOrchestrator,
        cleaner: MaskCleaner,
        inpainter: InpaintOrchestrator,
    ) -> Self {
        Self { detector, extractor, cleaner, inpainter }
    }

    /// Run the full pipeline on one image, writing into a timestamped run
    /// directory under `output_root`.
    pub fn run(&self, image_path: &Path, output_root: &Path) -> Result<RunSummary> {
        self.run_with_layout(image_path, &RunLayout::create(output_root)?)
    }

    /// Run the full pipeline into an explicit run directory.
    pub fn run_with_layout(&self, image_path: &Path, layout: &RunLayout) -> Result<RunSummary> {
        // Step 1: consult the detector oracle. Failure here is fatal to the
        // run: nothing downstream can proceed without instances.
        let detections = self.detector.detect(image_path)?;
        info!(instances = detections.instances.len(), "detector returned");

        // Step 2: decode the source image and keep a copy under original/.
        let image = image::open(image_path)?.to_rgb8();
        let file_name = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CutoutError::InvalidPath(image_path.display().to_string()))?;
        fs::copy(image_path, layout.original_path(file_name))?;

        // Step 3: extract cutout artifacts, one fresh registry per run.
        let mut registry = NamingRegistry::new();
        let artifacts = self.extractor.extract(&image, &detections, &mut registry, layout)?;
        let names: Vec<String> = artifacts.iter().map(|a| a.name.clone()).collect();

        // Step 4: clean every mask and persist it next to the raw one.
        for artifact in &artifacts {
            let cleaned = self.cleaner.clean(&artifact.mask);
            cleaned.save(layout.cleaned_mask_path(&artifact.name))?;
        }

        // Step 5: sequence the inpaint jobs.
        let inpainted = self.inpainter.run(&names, layout)?;

        Ok(RunSummary {
            base_dir: layout.base().to_path_buf(),
            instances_seen: detections.instances.len(),
            extracted: names,
            inpainted,
        })
    }
}
