use crate::cleaning::MaskCleaner;
use crate::error::{CutoutError, Result};
use crate::extract::ExtractionOrchestrator;
use crate::inpaint::InpaintOrchestrator;
use crate::oracle::{Detector, Inpainter};
use crate::pipeline::CutoutPipeline;

/// Builder for [`CutoutPipeline`] with a fluent API. The two oracles have no
/// sensible defaults and must be supplied; everything else falls back to the
/// stock configuration.
pub struct CutoutPipelineBuilder {
    detector: Option<Box<dyn Detector>>,
    inpainter: Option<Box<dyn Inpainter>>,
    extractor: Option<ExtractionOrchestrator>,
    cleaner: Option<MaskCleaner>,
}

impl Default for CutoutPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CutoutPipelineBuilder {
    pub fn new() -> Self {
        Self {
            detector: None,
            inpainter: None,
            extractor: None,
            cleaner: None,
        }
    }

    /// Set the segmentation oracle.
    pub fn detector<D>(mut self, detector: D) -> Self
    where
        D: Detector + 'static,
    {
        self.detector = Some(Box::new(detector));
        self
    }

    /// Set the inpainting oracle.
    pub fn inpainter<I>(mut self, inpainter: I) -> Self
    where
        I: Inpainter + 'static,
    {
        self.inpainter = Some(Box::new(inpainter));
        self
    }

    /// Restrict extraction to the given classes (replaces the default
    /// furniture list).
    pub fn allowed_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extractor = Some(ExtractionOrchestrator::new(classes));
        self
    }

    /// Replace the default mask-cleaning chain.
    pub fn cleaner(mut self, cleaner: MaskCleaner) -> Self {
        self.cleaner = Some(cleaner);
        self
    }

    /// Build the pipeline; fails if either oracle is missing.
    pub fn build(self) -> Result<CutoutPipeline> {
        let detector = self.detector.ok_or(CutoutError::MissingComponent("detector"))?;
        let inpainter = self.inpainter.ok_or(CutoutError::MissingComponent("inpainter"))?;

        Ok(CutoutPipeline::new(
            detector,
            self.extractor.unwrap_or_default(),
            self.cleaner.unwrap_or_default(),
            InpaintOrchestrator::new(inpainter),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_oracles_fails() {
        match CutoutPipeline::builder().build() {
            Err(CutoutError::MissingComponent(component)) => assert_eq!(component, "detector"),
            other => panic!("expected MissingComponent, got {:?}", other.map(|_| ())),
        }
    }
}
