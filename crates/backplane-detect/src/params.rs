use backplane_core::DEFAULT_MIN_DETERMINANT;
use serde::{Deserialize, Serialize};

/// Lower greenness bound for mask pixels.
pub const DEFAULT_GREEN_FLOOR: u8 = 15;
/// Upper greenness bound for mask pixels.
pub const DEFAULT_GREEN_CEILING: u8 = 255;
/// Douglas–Peucker tolerance as a fraction of the contour perimeter.
pub const DEFAULT_SIMPLIFY_RATIO: f64 = 0.02;
/// Triangle area (relative to the squared anchor span) below which three
/// anchors count as collinear.
pub const DEFAULT_COLLINEAR_REL_TOL: f64 = 1e-3;

/// Configuration for backplane localisation and rectification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectParams {
    /// Minimum `g - avg(r, b)` for a pixel to belong to the mask.
    pub green_floor: u8,
    /// Maximum `g - avg(r, b)` for a pixel to belong to the mask.
    pub green_ceiling: u8,
    /// Polygon simplification tolerance relative to contour perimeter.
    pub simplify_ratio: f64,
    /// Minimum anchor separation in pixels.
    pub min_anchor_separation: f32,
    /// Collinearity tolerance for anchor triples.
    pub collinear_rel_tol: f64,
    /// Minimum `|det|` of the rectifying homography.
    pub min_determinant: f64,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            green_floor: DEFAULT_GREEN_FLOOR,
            green_ceiling: DEFAULT_GREEN_CEILING,
            simplify_ratio: DEFAULT_SIMPLIFY_RATIO,
            min_anchor_separation: 1.0,
            collinear_rel_tol: DEFAULT_COLLINEAR_REL_TOL,
            min_determinant: DEFAULT_MIN_DETERMINANT,
        }
    }
}
