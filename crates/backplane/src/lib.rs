//! High-level facade for the `backplane-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core, detection and grid crates
//! - an end-to-end [`ScheduleReader`] over `image::RgbImage`
//! - batch processing with per-image failure isolation and JSON reports
//! - JSON configuration ([`PipelineConfig`]) and artifact naming
//!
//! ## Quickstart
//!
//! ```no_run
//! use backplane::{PipelineConfig, ScheduleReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = ScheduleReader::from_config(&PipelineConfig::default())?;
//! let img = backplane::load_rgb("schedule.jpg")?;
//! let reading = reader.read_image(&img)?;
//! print!("{}", reading.matrix);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `backplane::core`: image views, homographies, polygons, logger.
//! - `backplane::detect`: greenness mask, contour polygon, anchors, rectification.
//! - `backplane::grid`: cell layout, HSV histogram classification, matrices.

pub use backplane_core as core;
pub use backplane_detect as detect;
pub use backplane_grid as grid;

pub use backplane_grid::{ColorCode, ScheduleMatrix};

mod batch;
mod error;
mod io;
mod pipeline;

pub use batch::{run_batch, BatchMode, BatchOptions};
pub use error::PipelineError;
pub use io::{
    ArtifactNaming, BatchReport, ConfigIoError, ImageReport, ImageStatus, PipelineConfig,
};
pub use pipeline::{load_rgb, rgb_view, to_image_rgb, ScheduleReader, ScheduleReading};
