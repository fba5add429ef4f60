//! Inpainting phase: cleaned artifacts in, inpainted renditions on disk out.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::layout::RunLayout;
use crate::oracle::Inpainter;
use crate::prompt::{artifact_class, build_prompt};

/// One persisted inpainting result, keyed by artifact name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InpaintResult {
    pub name: String,
    pub prompt: String,
    pub path: PathBuf,
}

/// Sequences artifacts through the inpaint oracle, strictly one at a time.
/// Jobs are independent, so a failing oracle call is logged and the remaining
/// jobs still run; the summary carries attempted vs. succeeded counts.
pub struct InpaintOrchestrator {
    inpainter: Box<dyn Inpainter>,
}

impl InpaintOrchestrator {
    pub fn new(inpainter: Box<dyn Inpainter>) -> Self {
        Self { inpainter }
    }

    /// Run one inpaint job per artifact name, in the given (extraction)
    /// order. Expects the crop and cleaned mask to exist at their
    /// convention paths under `layout`.
    pub fn run(&self, artifact_names: &[String], layout: &RunLayout) -> Result<Vec<InpaintResult>> {
        let mut results = Vec::new();

        for name in artifact_names {
            // The crop is RGBA on disk; the oracle wants opaque RGB.
            let crop = image::open(layout.crop_path(name))?.to_rgb8();
            let mask = image::open(layout.cleaned_mask_path(name))?.to_luma8();
            let prompt = build_prompt(artifact_class(name));

            let output = match self.inpainter.inpaint(&crop, &mask, &prompt) {
                Ok(output) => output,
                Err(err) => {
                    warn!(%name, %err, "inpaint job failed, continuing with remaining jobs");
                    continue;
                }
            };

            let path = layout.inpaint_path(name);
            output.save(&path)?;
            debug!(%name, path = %path.display(), "persisted inpaint result");
            results.push(InpaintResult { name: name.clone(), prompt, path });
        }

        info!(
            attempted = artifact_names.len(),
            succeeded = results.len(),
            "inpainting finished"
        );
        Ok(results)
    }
}
