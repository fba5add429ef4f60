//! # Furniture Cutout & Inpainting Pipeline
//!
//! Turns instance-segmentation results for a photograph into standalone
//! transparent cutouts, cleans each mask, and drives a text-prompted
//! inpainting step to produce an isolated rendition of every detected
//! object. The segmentation and inpainting models are opaque oracles behind
//! the [`Detector`] and [`Inpainter`] traits; this crate owns everything in
//! between: box clamping, mask rasterization, alpha compositing, stable
//! per-class naming, morphological mask cleaning, prompt construction, and
//! the per-object inpaint sequencing.
//!
//! ## Output layout
//!
//! Every run writes into its own base directory:
//!
//! ```text
//! <base>/original/<source-filename>
//! <base>/crop/<class>_<index>.png            RGBA cutout, alpha = mask
//! <base>/mask/<class>_<index>_mask.png       binary mask
//! <base>/mask/<class>_<index>_cleaned_mask.png
//! <base>/inpaint/<class>_<index>_inpainted.png
//! ```
//!
//! `{class}_{index}` is the join key between the extraction and inpainting
//! phases.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use cutout::{MaskCleaner, build_prompt};
//!
//! // Clean a single mask.
//! let mask = image::open("mask/chair_1_mask.png")?.to_luma8();
//! let cleaned = MaskCleaner::new().clean(&mask);
//! cleaned.save("mask/chair_1_cleaned_mask.png")?;
//!
//! // Prompts are pure functions of the class name.
//! assert!(build_prompt("dining_table").contains("dining table"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A full run wires both oracles through the builder:
//!
//! ```rust,ignore
//! let pipeline = CutoutPipeline::builder()
//!     .detector(my_detector)
//!     .inpainter(my_inpainter)
//!     .allowed_classes(["chair", "couch", "bed"])
//!     .build()?;
//! let summary = pipeline.run(Path::new("room.jpg"), Path::new("img"))?;
//! ```

// Core modules
pub mod cleaning;
pub mod error;
pub mod extract;
pub mod inpaint;
pub mod layout;
pub mod naming;
pub mod oracle;
pub mod pipeline;
pub mod prompt;
pub mod raster;
pub mod types;

// Re-exports for convenience
pub use cleaning::{GaussianSmooth, MaskCleaner, MaskFilter, MorphologicalClose, Rebinarize};
pub use error::{CutoutError, Result};
pub use extract::{DEFAULT_FURNITURE_CLASSES, ExtractionOrchestrator};
pub use inpaint::{InpaintOrchestrator, InpaintResult};
pub use layout::RunLayout;
pub use naming::NamingRegistry;
pub use oracle::{Detector, Inpainter};
pub use pipeline::{CutoutPipeline, RunSummary, builder::CutoutPipelineBuilder};
pub use prompt::{artifact_class, build_prompt};
pub use types::{
    BoundingBox, ClampedBox, DetectionInstance, DetectionOutput, ExtractedArtifact,
    normalize_class_name,
};
