//! Morphological mask cleaning.
//!
//! Segmentation masks carry pinholes and staircase edges; the cleaner runs a
//! fixed sequence of filters to produce a hard-edged mask the inpaint oracle
//! can use as a region boundary: close small gaps, smooth the outline, then
//! rebinarize. The sequence is deterministic but not strictly idempotent —
//! re-cleaning an already-clean mask may still nudge a few boundary pixels.

use image::GrayImage;
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;

use crate::raster::BINARY_THRESHOLD;

/// One step of the mask-cleaning sequence.
pub trait MaskFilter: Send + Sync {
    fn apply(&self, mask: &GrayImage) -> GrayImage;
}

/// Morphological closing: fills pinhole gaps without growing the silhouette
/// beyond what closing implies. `radius` is in the L∞ norm, so radius 3 means
/// a 7×7 square structuring element.
#[derive(Debug, Clone)]
pub struct MorphologicalClose {
    pub radius: u8,
}

impl Default for MorphologicalClose {
    fn default() -> Self {
        Self { radius: 3 }
    }
}

impl MaskFilter for MorphologicalClose {
    fn apply(&self, mask: &GrayImage) -> GrayImage {
        close(mask, Norm::LInf, self.radius)
    }
}

/// Gaussian smoothing to knock staircase jaggedness off the boundary.
#[derive(Debug, Clone)]
pub struct GaussianSmooth {
    pub sigma: f32,
}

impl Default for GaussianSmooth {
    fn default() -> Self {
        // Matches a 5x5 Gaussian kernel.
        Self { sigma: 1.1 }
    }
}

impl MaskFilter for GaussianSmooth {
    fn apply(&self, mask: &GrayImage) -> GrayImage {
        gaussian_blur_f32(mask, self.sigma)
    }
}

/// Rebinarization: smoothing produces soft alpha, and inpaint oracles expect
/// hard region boundaries.
#[derive(Debug, Clone)]
pub struct Rebinarize {
    pub threshold: u8,
}

impl Default for Rebinarize {
    fn default() -> Self {
        Self { threshold: BINARY_THRESHOLD }
    }
}

impl MaskFilter for Rebinarize {
    fn apply(&self, mask: &GrayImage) -> GrayImage {
        threshold(mask, self.threshold, ThresholdType::Binary)
    }
}

/// Composes the cleaning filters in order. The default chain is
/// close → smooth → rebinarize.
pub struct MaskCleaner {
    filters: Vec<Box<dyn MaskFilter>>,
}

impl Default for MaskCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskCleaner {
    pub fn new() -> Self {
        Self {
            filters: vec![
                Box::new(MorphologicalClose::default()),
                Box::new(GaussianSmooth::default()),
                Box::new(Rebinarize::default()),
            ],
        }
    }

    /// Build a cleaner with a custom filter chain.
    pub fn with_filters(filters: Vec<Box<dyn MaskFilter>>) -> Self {
        Self { filters }
    }

    pub fn clean(&self, mask: &GrayImage) -> GrayImage {
        let mut current = mask.clone();
        for filter in &self.filters {
            current = filter.apply(&current);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Solid 40x40 square on a 64x64 canvas with a few pinholes punched in.
    fn holey_square() -> GrayImage {
        let mut img = GrayImage::new(64, 64);
        for y in 12..52 {
            for x in 12..52 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        for &(x, y) in &[(20, 20), (30, 35), (40, 25)] {
            img.put_pixel(x, y, Luma([0u8]));
        }
        img
    }

    fn differing_pixels(a: &GrayImage, b: &GrayImage) -> usize {
        a.pixels().zip(b.pixels()).filter(|(p, q)| p != q).count()
    }

    #[test]
    fn cleaning_fills_pinholes() {
        let cleaner = MaskCleaner::new();
        let cleaned = cleaner.clean(&holey_square());
        for &(x, y) in &[(20, 20), (30, 35), (40, 25)] {
            assert_eq!(cleaned.get_pixel(x, y).0[0], 255, "pinhole at ({x},{y}) not filled");
        }
    }

    #[test]
    fn cleaned_masks_are_strictly_binary() {
        let cleaner = MaskCleaner::new();
        let cleaned = cleaner.clean(&holey_square());
        assert!(cleaned.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn cleaning_preserves_dimensions() {
        let cleaner = MaskCleaner::new();
        let mask = holey_square();
        let cleaned = cleaner.clean(&mask);
        assert_eq!(cleaned.dimensions(), mask.dimensions());
    }

    #[test]
    fn recleaning_perturbs_less_than_one_percent_of_pixels() {
        let cleaner = MaskCleaner::new();
        let once = cleaner.clean(&holey_square());
        let twice = cleaner.clean(&once);

        let total = (once.width() * once.height()) as usize;
        let delta = differing_pixels(&once, &twice);
        assert!(
            delta * 100 < total,
            "recleaning changed {delta} of {total} pixels"
        );
    }
}
