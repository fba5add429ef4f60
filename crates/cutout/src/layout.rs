//! Run-scoped output directory layout.
//!
//! Every run writes into its own base directory with four fixed areas:
//!
//! ```text
//! <base>/original/<source-filename>
//! <base>/crop/<class>_<index>.png
//! <base>/mask/<class>_<index>_mask.png
//! <base>/mask/<class>_<index>_cleaned_mask.png
//! <base>/inpaint/<class>_<index>_inpainted.png
//! ```
//!
//! The `{class}_{index}` naming convention is the sole join key between the
//! extraction and inpainting phases, so all convention paths are defined
//! here and nowhere else.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const ORIGINAL_DIR: &str = "original";
const CROP_DIR: &str = "crop";
const MASK_DIR: &str = "mask";
const INPAINT_DIR: &str = "inpaint";

#[derive(Debug, Clone)]
pub struct RunLayout {
    base: PathBuf,
}

impl RunLayout {
    /// Create a timestamped run directory under `root`, e.g.
    /// `img/20260829_143052`, with all four output areas.
    pub fn create(root: impl AsRef<Path>) -> Result<Self> {
        let run_id = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::at(root.as_ref().join(run_id))
    }

    /// Use `base` itself as the run directory, creating the output areas.
    pub fn at(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        for dir in [ORIGINAL_DIR, CROP_DIR, MASK_DIR, INPAINT_DIR] {
            fs::create_dir_all(base.join(dir))?;
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn original_path(&self, file_name: &str) -> PathBuf {
        self.base.join(ORIGINAL_DIR).join(file_name)
    }

    pub fn crop_path(&self, name: &str) -> PathBuf {
        self.base.join(CROP_DIR).join(format!("{name}.png"))
    }

    pub fn mask_path(&self, name: &str) -> PathBuf {
        self.base.join(MASK_DIR).join(format!("{name}_mask.png"))
    }

    pub fn cleaned_mask_path(&self, name: &str) -> PathBuf {
        self.base.join(MASK_DIR).join(format!("{name}_cleaned_mask.png"))
    }

    pub fn inpaint_path(&self, name: &str) -> PathBuf {
        self.base.join(INPAINT_DIR).join(format!("{name}_inpainted.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_creates_all_output_areas() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let layout = RunLayout::at(tmp.path().join("run")).expect("layout");
        for dir in ["original", "crop", "mask", "inpaint"] {
            assert!(layout.base().join(dir).is_dir(), "missing {dir}/");
        }
    }

    #[test]
    fn convention_paths_use_the_join_key() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let layout = RunLayout::at(tmp.path().join("run")).expect("layout");

        assert!(layout.crop_path("chair_1").ends_with("crop/chair_1.png"));
        assert!(layout.mask_path("chair_1").ends_with("mask/chair_1_mask.png"));
        assert!(
            layout
                .cleaned_mask_path("chair_1")
                .ends_with("mask/chair_1_cleaned_mask.png")
        );
        assert!(
            layout
                .inpaint_path("chair_1")
                .ends_with("inpaint/chair_1_inpainted.png")
        );
        assert!(layout.original_path("room.jpg").ends_with("original/room.jpg"));
    }

    #[test]
    fn create_nests_a_run_id_under_the_root() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let layout = RunLayout::create(tmp.path()).expect("layout");
        assert_eq!(layout.base().parent(), Some(tmp.path()));
        assert!(layout.base().join("crop").is_dir());
    }
}
