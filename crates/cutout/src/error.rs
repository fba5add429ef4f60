use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutoutError {
    #[error("Image codec error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Clamped bounding box ({x1},{y1})-({x2},{y2}) has zero area")]
    EmptyRegion { x1: u32, y1: u32, x2: u32, y2: u32 },

    #[error("Shape mismatch for '{name}': crop is {crop_width}x{crop_height}, mask is {mask_width}x{mask_height}")]
    ShapeMismatch {
        name: String,
        crop_width: u32,
        crop_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    #[error("Oracle invocation failed: {0}")]
    OracleInvocation(String),

    #[error("Pipeline is missing a {0}")]
    MissingComponent(&'static str),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CutoutError>;
