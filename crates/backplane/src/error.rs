use backplane_detect::DetectError;
use backplane_grid::{ClassifyError, ScanError};
use std::path::PathBuf;

/// Per-image failure of the end-to-end pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to write {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PipelineError {
    /// Stable snake_case name of the failure, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::ImageLoad { .. } => "image_load_failure",
            PipelineError::Detect(DetectError::NoBackplaneDetected) => "no_backplane_detected",
            PipelineError::Detect(DetectError::InsufficientAnchors { .. }) => "insufficient_anchors",
            PipelineError::Detect(DetectError::DegenerateHomography { .. }) => {
                "degenerate_homography"
            }
            PipelineError::Scan(ScanError::GridTooFine { .. }) => "grid_too_fine",
            PipelineError::Scan(ScanError::Cell {
                source: ClassifyError::AmbiguousColorClassification { .. },
                ..
            }) => "ambiguous_color_classification",
            PipelineError::Scan(ScanError::InvalidParams(_)) => "invalid_params",
            PipelineError::ArtifactWrite { .. } => "artifact_write",
        }
    }

    /// `(row, col)` of the failing cell, if any.
    pub fn cell(&self) -> Option<(usize, usize)> {
        match self {
            PipelineError::Scan(ScanError::Cell { row, col, .. }) => Some((*row, *col)),
            _ => None,
        }
    }
}
