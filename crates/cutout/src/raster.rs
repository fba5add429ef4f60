//! Mask rasterization and alpha compositing.
//!
//! Detector masks arrive at the model's native resolution; these routines
//! bring them to source-image resolution, crop them to a clamped box, force a
//! strict 0/255 encoding, and merge them with the RGB crop into an RGBA
//! cutout. Masks are categorical, so every resize here is nearest-neighbor —
//! bilinear resampling would invent fractional alpha along the silhouette.

use image::{GrayImage, Rgba, RgbaImage, RgbImage, imageops};
use imageproc::contrast::{ThresholdType, threshold};

use crate::error::{CutoutError, Result};
use crate::types::ClampedBox;

/// Threshold used whenever a mask is rebinarized after resampling.
pub const BINARY_THRESHOLD: u8 = 127;

/// Resize a detector-resolution mask to the full source-image resolution.
pub fn to_image_resolution(mask: &GrayImage, width: u32, height: u32) -> GrayImage {
    if mask.dimensions() == (width, height) {
        mask.clone()
    } else {
        imageops::resize(mask, width, height, imageops::FilterType::Nearest)
    }
}

/// Crop an image-resolution mask to the clamped box and rebinarize so the
/// output is strictly {0, 255} even after resampling artifacts.
pub fn crop_and_binarize(raster: &GrayImage, region: ClampedBox, binary_threshold: u8) -> GrayImage {
    let cropped = imageops::crop_imm(
        raster,
        region.x1,
        region.y1,
        region.width(),
        region.height(),
    )
    .to_image();
    threshold(&cropped, binary_threshold, ThresholdType::Binary)
}

/// Force a mask to the RGB crop's exact dimensions. The crop and the mask go
/// through independent rounding paths, so they can disagree by a pixel; the
/// compositor requires shape equality, not near-equality.
pub fn match_crop_shape(mask: GrayImage, crop_width: u32, crop_height: u32) -> GrayImage {
    if mask.dimensions() == (crop_width, crop_height) {
        mask
    } else {
        imageops::resize(&mask, crop_width, crop_height, imageops::FilterType::Nearest)
    }
}

/// Merge an RGB crop and its binary mask into an RGBA cutout: the color
/// channels are copied verbatim and the mask becomes the alpha channel, so
/// alpha is always exactly 0 or 255.
pub fn composite(name: &str, crop: &RgbImage, mask: &GrayImage) -> Result<RgbaImage> {
    let (crop_width, crop_height) = crop.dimensions();
    let (mask_width, mask_height) = mask.dimensions();
    if (crop_width, crop_height) != (mask_width, mask_height) {
        return Err(CutoutError::ShapeMismatch {
            name: name.to_owned(),
            crop_width,
            crop_height,
            mask_width,
            mask_height,
        });
    }

    Ok(RgbaImage::from_fn(crop_width, crop_height, |x, y| {
        let rgb = crop.get_pixel(x, y).0;
        let alpha = mask.get_pixel(x, y).0[0];
        Rgba([rgb[0], rgb[1], rgb[2], alpha])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn checker_mask(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 { Luma([255u8]) } else { Luma([0u8]) }
        })
    }

    #[test]
    fn nearest_resize_preserves_binary_values() {
        let mask = checker_mask(8, 8);
        let resized = to_image_resolution(&mask, 32, 20);
        assert_eq!(resized.dimensions(), (32, 20));
        assert!(resized.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn crop_and_binarize_is_strictly_binary() {
        // Grayscale ramp: everything above the threshold must snap to 255.
        let ramp = GrayImage::from_fn(16, 16, |x, _| Luma([(x * 16) as u8]));
        let region = ClampedBox { x1: 2, y1: 2, x2: 14, y2: 14 };
        let binary = crop_and_binarize(&ramp, region, BINARY_THRESHOLD);
        assert_eq!(binary.dimensions(), (12, 12));
        assert!(binary.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
        assert_eq!(binary.get_pixel(0, 0).0[0], 0); // ramp value 32
        assert_eq!(binary.get_pixel(11, 0).0[0], 255); // ramp value 208
    }

    #[test]
    fn match_crop_shape_corrects_dimensions() {
        let mask = checker_mask(10, 10);
        let corrected = match_crop_shape(mask, 11, 9);
        assert_eq!(corrected.dimensions(), (11, 9));
        assert!(corrected.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn composite_copies_mask_into_alpha() {
        let crop = RgbImage::from_fn(6, 4, |x, y| image::Rgb([x as u8, y as u8, 7]));
        let mask = checker_mask(6, 4);
        let rgba = composite("chair_1", &crop, &mask).expect("Shapes match");

        for (x, y, pixel) in rgba.enumerate_pixels() {
            let expected = mask.get_pixel(x, y).0[0];
            assert_eq!(pixel.0[3], expected);
            assert_eq!(&pixel.0[..3], &crop.get_pixel(x, y).0[..]);
        }
    }

    #[test]
    fn composite_rejects_mismatched_shapes() {
        let crop = RgbImage::new(6, 4);
        let mask = checker_mask(5, 4);
        assert!(matches!(
            composite("chair_1", &crop, &mask),
            Err(CutoutError::ShapeMismatch { .. })
        ));
    }
}
