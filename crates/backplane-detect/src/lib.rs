//! Backplane localisation and rectification.
//!
//! Pipeline:
//! 1. Build a binary "greenness" mask (`g - avg(r, b)` thresholded).
//! 2. Trace all mask contours, simplify each with Douglas–Peucker and keep
//!    the largest-area polygon.
//! 3. Order four anchors from the polygon: near/far corners by distance from
//!    the image origin, the remaining two by quadrant area maximisation.
//! 4. Solve the anchor → rectangle homography and warp the backplane into
//!    an axis-aligned image whose size follows the detected edge lengths.
//!
//! ```
//! use backplane_core::RgbImage;
//! use backplane_detect::{BackplaneDetector, DetectError, DetectParams};
//!
//! let blank = RgbImage::new(64, 64);
//! let detector = BackplaneDetector::new(DetectParams::default());
//! let err = detector.detect(&blank.view()).unwrap_err();
//! assert!(matches!(err, DetectError::NoBackplaneDetected));
//! ```

mod anchors;
mod contour;
mod detector;
mod error;
mod mask;
mod params;
mod rectify;

pub use anchors::{order_anchors, AnchorSet};
pub use contour::find_largest_polygon;
pub use detector::{BackplaneDetection, BackplaneDetector};
pub use error::DetectError;
pub use mask::{greenness, MaskBuilder};
pub use params::{
    DetectParams, DEFAULT_COLLINEAR_REL_TOL, DEFAULT_GREEN_CEILING, DEFAULT_GREEN_FLOOR,
    DEFAULT_SIMPLIFY_RATIO,
};
pub use rectify::{rectified_size, rectify_backplane, rectify_to_size, RectifiedBackplane};
