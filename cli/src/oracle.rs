//! Subprocess-backed oracle implementations.
//!
//! The detector and inpainter are external programs (typically Python model
//! wrappers) invoked once per call with file-based exchange: inputs land in
//! temp files, the program writes its answer to a path we pass it, and a
//! non-zero exit surfaces the program's stderr in the error.
//!
//! Detector protocol: `<command> <args..> --image <path> --output <json>`
//! where the JSON is
//!
//! ```json
//! {
//!   "classes": { "0": "chair" },
//!   "instances": [
//!     { "class_id": 0, "score": 0.93, "bbox": [x1, y1, x2, y2],
//!       "mask_png_b64": "<base64 PNG, detector resolution>" }
//!   ]
//! }
//! ```
//!
//! Inpainter protocol: `<command> <args..> --image <png> --mask <png>
//! --prompt <text> --output <png>`.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use cutout::{
    BoundingBox, CutoutError, Detector, DetectionInstance, DetectionOutput, Inpainter, Result,
};
use image::{GrayImage, RgbImage};

#[derive(Debug, Serialize, Deserialize)]
struct InstanceReport {
    class_id: u32,
    score: f32,
    bbox: [f32; 4],
    mask_png_b64: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DetectionReport {
    classes: BTreeMap<u32, String>,
    instances: Vec<InstanceReport>,
}

fn run_oracle_command(mut cmd: Command, what: &str) -> Result<()> {
    let output = cmd
        .output()
        .map_err(|e| CutoutError::OracleInvocation(format!("failed to spawn {what}: {e}")))?;
    if !output.status.success() {
        return Err(CutoutError::OracleInvocation(format!(
            "{what} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}

/// Segmentation oracle backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandDetector {
    command: String,
    args: Vec<String>,
}

impl CommandDetector {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self { command: command.into(), args }
    }
}

impl Detector for CommandDetector {
    fn detect(&self, image_path: &Path) -> Result<DetectionOutput> {
        let report_file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()?;

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg("--image")
            .arg(image_path)
            .arg("--output")
            .arg(report_file.path());
        run_oracle_command(cmd, "detector")?;

        let content = std::fs::read_to_string(report_file.path())?;
        let report: DetectionReport = serde_json::from_str(&content)?;

        let mut instances = Vec::with_capacity(report.instances.len());
        for item in report.instances {
            let bytes = STANDARD.decode(&item.mask_png_b64).map_err(|e| {
                CutoutError::OracleInvocation(format!("detector sent an undecodable mask: {e}"))
            })?;
            let mask = image::load_from_memory(&bytes)?.to_luma8();
            let [x1, y1, x2, y2] = item.bbox;
            instances.push(DetectionInstance {
                class_id: item.class_id,
                score: item.score,
                mask,
                bbox: BoundingBox::new(x1, y1, x2, y2),
            });
        }

        Ok(DetectionOutput { class_names: report.classes, instances })
    }
}

/// Inpainting oracle backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandInpainter {
    command: String,
    args: Vec<String>,
}

impl CommandInpainter {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self { command: command.into(), args }
    }
}

impl Inpainter for CommandInpainter {
    fn inpaint(&self, image: &RgbImage, mask: &GrayImage, prompt: &str) -> Result<RgbImage> {
        let workdir = tempfile::tempdir()?;
        let image_path = workdir.path().join("image.png");
        let mask_path = workdir.path().join("mask.png");
        let output_path = workdir.path().join("output.png");
        image.save(&image_path)?;
        mask.save(&mask_path)?;

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg("--image")
            .arg(&image_path)
            .arg("--mask")
            .arg(&mask_path)
            .arg("--prompt")
            .arg(prompt)
            .arg("--output")
            .arg(&output_path);
        run_oracle_command(cmd, "inpainter")?;

        Ok(image::open(&output_path)?.to_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use std::io::Cursor;

    fn png_b64(img: &GrayImage) -> String {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("encode png");
        STANDARD.encode(buf)
    }

    #[cfg(unix)]
    #[test]
    fn detector_parses_the_report_and_decodes_masks() {
        let mask = GrayImage::from_pixel(8, 6, Luma([255u8]));
        let report = DetectionReport {
            classes: BTreeMap::from([(0, "chair".to_owned())]),
            instances: vec![InstanceReport {
                class_id: 0,
                score: 0.9,
                bbox: [1.0, 2.0, 7.0, 5.0],
                mask_png_b64: png_b64(&mask),
            }],
        };

        let tmp = tempfile::tempdir().expect("tempdir");
        let report_path = tmp.path().join("report.json");
        std::fs::write(&report_path, serde_json::to_string(&report).expect("serialize"))
            .expect("write report");

        // "$3" is the --output value appended by the detector.
        let detector = CommandDetector::new(
            "sh",
            vec!["-c".to_owned(), format!("cp '{}' \"$3\"", report_path.display())],
        );
        let detections = detector.detect(Path::new("unused.png")).expect("detect");

        assert_eq!(detections.class_names.get(&0).map(String::as_str), Some("chair"));
        assert_eq!(detections.instances.len(), 1);
        assert_eq!(detections.instances[0].mask.dimensions(), (8, 6));
        assert_eq!(detections.instances[0].bbox, BoundingBox::new(1.0, 2.0, 7.0, 5.0));
    }

    #[cfg(unix)]
    #[test]
    fn inpainter_round_trips_through_the_command() {
        // "$1" is the input image, "$7" the requested output path.
        let inpainter = CommandInpainter::new(
            "sh",
            vec!["-c".to_owned(), "cp \"$1\" \"$7\"".to_owned()],
        );

        let crop = RgbImage::from_pixel(10, 8, image::Rgb([5, 6, 7]));
        let mask = GrayImage::from_pixel(10, 8, Luma([255u8]));
        let result = inpainter.inpaint(&crop, &mask, "a clean, a realistic chair").expect("inpaint");
        assert_eq!(result, crop);
    }

    #[cfg(unix)]
    #[test]
    fn a_failing_command_surfaces_as_an_oracle_error() {
        let inpainter = CommandInpainter::new("false", Vec::new());
        let crop = RgbImage::new(4, 4);
        let mask = GrayImage::new(4, 4);
        assert!(matches!(
            inpainter.inpaint(&crop, &mask, "prompt"),
            Err(CutoutError::OracleInvocation(_))
        ));
    }
}
