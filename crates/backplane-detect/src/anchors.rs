//! Corner ordering from an unordered polygon.
//!
//! Near and far corners are the vertices closest to and farthest from the
//! image origin. The two remaining corners are the vertices that maximise
//! `|dx| * |dy|` against the near/far midpoint inside the lower-left and
//! upper-right quadrants. Area maximisation tolerates the extra vertices
//! polygon simplification leaves next to a true corner.

use backplane_core::Polygon;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::DetectError;

/// Four backplane corners in image coordinates (x right, y down).
///
/// Order is fixed: `near` (closest to the origin), `bottom_left`, `far`,
/// `top_right`. This walks the quad and matches the destination corners
/// `(0,0)`, `(0,h)`, `(w,h)`, `(w,0)` used by rectification.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorSet {
    pub near: Point2<f32>,
    pub bottom_left: Point2<f32>,
    pub far: Point2<f32>,
    pub top_right: Point2<f32>,
}

impl AnchorSet {
    pub fn from_array([near, bottom_left, far, top_right]: [Point2<f32>; 4]) -> Self {
        Self {
            near,
            bottom_left,
            far,
            top_right,
        }
    }

    pub fn to_array(&self) -> [Point2<f32>; 4] {
        [self.near, self.bottom_left, self.far, self.top_right]
    }

    /// Reject coinciding anchors, collinear anchor triples and non-convex
    /// quads.
    ///
    /// `min_separation` is in pixels; `collinear_rel_tol` bounds each
    /// triangle's doubled area relative to the squared largest anchor span.
    pub fn validate(
        &self,
        min_separation: f32,
        collinear_rel_tol: f64,
    ) -> Result<(), DetectError> {
        let pts = self.to_array();

        let mut span2 = 0.0_f64;
        for i in 0..4 {
            for j in i + 1..4 {
                let d = (pts[j] - pts[i]).norm();
                if !d.is_finite() || d < min_separation {
                    return Err(DetectError::DegenerateHomography {
                        reason: "anchors coincide",
                    });
                }
                span2 = span2.max((d as f64).powi(2));
            }
        }

        for (i, j, k) in [(0, 1, 2), (0, 1, 3), (0, 2, 3), (1, 2, 3)] {
            let (a, b, c) = (pts[i], pts[j], pts[k]);
            let cross = (b.x - a.x) as f64 * (c.y - a.y) as f64
                - (b.y - a.y) as f64 * (c.x - a.x) as f64;
            if cross.abs() <= collinear_rel_tol * span2 {
                return Err(DetectError::DegenerateHomography {
                    reason: "three anchors are collinear",
                });
            }
        }

        // a rectangle only maps onto a convex quad
        let turns = (0..4).map(|i| {
            let (a, b, c) = (pts[i], pts[(i + 1) % 4], pts[(i + 2) % 4]);
            (b.x - a.x) as f64 * (c.y - b.y) as f64 - (b.y - a.y) as f64 * (c.x - b.x) as f64
        });
        let (mut pos, mut neg) = (false, false);
        for t in turns {
            pos |= t > 0.0;
            neg |= t < 0.0;
        }
        if pos == neg {
            return Err(DetectError::DegenerateHomography {
                reason: "anchors do not form a convex quad",
            });
        }
        Ok(())
    }
}

/// Order four anchors from an unordered polygon.
///
/// Precondition: the backplane does not surround the image origin `(0,0)`,
/// so the origin-distance extremes are diagonal corners. Ties keep the first
/// vertex in polygon order. An elongated quad rotated far from the image
/// axes can leave both side corners outside their quadrants; that is
/// reported as insufficient anchors.
///
/// Fails with [`DetectError::InsufficientAnchors`] when the polygon has fewer
/// than four vertices or either quadrant holds no candidate.
pub fn order_anchors(polygon: &Polygon) -> Result<AnchorSet, DetectError> {
    let pts = &polygon.vertices;
    if pts.len() < 4 {
        return Err(DetectError::InsufficientAnchors { found: pts.len() });
    }

    let mut near = (f32::INFINITY, pts[0]);
    let mut far = (f32::NEG_INFINITY, pts[0]);
    for &p in pts {
        let d = p.coords.norm();
        if d > far.0 {
            far = (d, p);
        }
        if d < near.0 {
            near = (d, p);
        }
    }
    let (near, far) = (near.1, far.1);
    let mid = Point2::from((near.coords + far.coords) * 0.5);

    let mut bottom_left: Option<(f32, Point2<f32>)> = None;
    let mut top_right: Option<(f32, Point2<f32>)> = None;
    for &p in pts {
        let area = (p.x - mid.x).abs() * (p.y - mid.y).abs();
        let better = |best: &Option<(f32, Point2<f32>)>| best.map_or(true, |(a, _)| area > a);
        if p.x < mid.x && p.y > mid.y && better(&bottom_left) {
            bottom_left = Some((area, p));
        }
        if p.x > mid.x && p.y < mid.y && better(&top_right) {
            top_right = Some((area, p));
        }
    }

    match (bottom_left, top_right) {
        (Some((_, bottom_left)), Some((_, top_right))) => Ok(AnchorSet {
            near,
            bottom_left,
            far,
            top_right,
        }),
        (bl, tr) => Err(DetectError::InsufficientAnchors {
            found: 2 + usize::from(bl.is_some()) + usize::from(tr.is_some()),
        }),
    }
}
