//! JSON configuration and report helpers.

use backplane_detect::{AnchorSet, DetectParams};
use backplane_grid::{ClassifierParams, GridParams, ParamsError};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ParamsError),
}

/// File names for persisted rectified images: `{prefix}-{index:0width}.{extension}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNaming {
    pub prefix: String,
    pub extension: String,
    pub index_width: usize,
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self {
            prefix: "result".to_string(),
            extension: "jpg".to_string(),
            index_width: 3,
        }
    }
}

impl ArtifactNaming {
    /// Name for the one-based input `index`.
    pub fn file_name(&self, index: usize) -> String {
        format!(
            "{}-{:0width$}.{}",
            self.prefix,
            index,
            self.extension,
            width = self.index_width
        )
    }

    pub fn path_in(&self, dir: impl AsRef<Path>, index: usize) -> PathBuf {
        dir.as_ref().join(self.file_name(index))
    }
}

/// Process-wide configuration, loaded once and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub detect: DetectParams,
    pub classifier: ClassifierParams,
    pub grid: GridParams,
    pub artifacts: ArtifactNaming,
}

impl PipelineConfig {
    /// Load a JSON config from disk and validate it.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.grid.validate()?;
        self.classifier.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Ok,
    Failed,
}

/// Outcome for one input image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageReport {
    pub path: String,
    /// One-based position in the batch.
    pub index: usize,
    pub status: ImageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<[f32; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<AnchorSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectified_size: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl ImageReport {
    pub fn new(path: impl Into<String>, index: usize) -> Self {
        Self {
            path: path.into(),
            index,
            status: ImageStatus::Ok,
            polygon: None,
            anchors: None,
            rectified_size: None,
            artifact: None,
            matrix: None,
            error: None,
            error_kind: None,
        }
    }
}

/// Per-image outcomes of a batch run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub images: Vec<ImageReport>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.images
            .iter()
            .filter(|r| r.status == ImageStatus::Failed)
            .count()
    }

    pub fn succeeded(&self) -> usize {
        self.images.len() - self.failed()
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
