//! Core types and utilities for backplane schedule reading.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image decoder: callers hand in row-major byte
//! buffers through the lightweight view types below.

mod geometry;
mod homography;
mod image;
mod logger;

pub use geometry::Polygon;
pub use homography::{
    homography_from_4pt, warp_perspective_rgb, Homography, DEFAULT_MIN_DETERMINANT,
};
pub use image::{sample_bilinear_rgb, GrayImage, RgbImage, RgbImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
