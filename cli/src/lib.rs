pub mod oracle;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutoutCliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// External command implementing one of the two model oracles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OracleCommand {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// One pipeline run: source image, output root and the two oracle commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub image: String,
    pub output_dir: String,
    /// Classes to extract; defaults to the built-in furniture list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_classes: Option<Vec<String>>,
    pub detector: OracleCommand,
    pub inpainter: OracleCommand,
}

impl RunConfig {
    /// Load a run configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CutoutCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load a run configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, CutoutCliError> {
        let config: RunConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a run configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CutoutCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a run configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, CutoutCliError> {
        let config: RunConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Auto-detect file format and load the configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CutoutCliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CutoutCliError::UnsupportedFileFormat),
        }
    }

    /// Convert the configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, CutoutCliError> {
        let toml = toml::to_string_pretty(&self)?;
        Ok(toml)
    }

    /// Convert the configuration to a JSON string
    pub fn to_json(&self) -> Result<String, CutoutCliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}
