use backplane_core::{GrayImage, Polygon, RgbImageView};

use crate::{
    find_largest_polygon, order_anchors, rectify_backplane, AnchorSet, DetectError,
    DetectParams, MaskBuilder, RectifiedBackplane,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Full result of a backplane detection.
#[derive(Clone, Debug)]
pub struct BackplaneDetection {
    /// Largest simplified polygon found in the greenness mask.
    pub polygon: Polygon,
    pub anchors: AnchorSet,
    pub rectified: RectifiedBackplane,
    /// Number of pixels that passed the greenness threshold.
    pub mask_pixels: usize,
}

/// Locates the green backplane and rectifies it.
#[derive(Clone, Debug, Default)]
pub struct BackplaneDetector {
    params: DetectParams,
}

impl BackplaneDetector {
    pub fn new(params: DetectParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectParams {
        &self.params
    }

    /// Find the backplane polygon and its ordered anchors without warping.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(w = img.width, h = img.height))
    )]
    pub fn locate(&self, img: &RgbImageView<'_>) -> Result<(Polygon, AnchorSet), DetectError> {
        let mask = MaskBuilder::from_params(&self.params).build(img);
        self.locate_in_mask(&mask)
    }

    fn locate_in_mask(&self, mask: &GrayImage) -> Result<(Polygon, AnchorSet), DetectError> {
        let polygon = find_largest_polygon(mask, self.params.simplify_ratio)?;
        if polygon.len() < 4 {
            return Err(DetectError::InsufficientAnchors {
                found: polygon.len(),
            });
        }
        let anchors = order_anchors(&polygon)?;
        log::debug!(
            "anchors near={:?} bottom_left={:?} far={:?} top_right={:?}",
            anchors.near,
            anchors.bottom_left,
            anchors.far,
            anchors.top_right
        );
        Ok((polygon, anchors))
    }

    /// Locate the backplane and warp it into an axis-aligned image.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(w = img.width, h = img.height))
    )]
    pub fn detect(&self, img: &RgbImageView<'_>) -> Result<BackplaneDetection, DetectError> {
        let mask = MaskBuilder::from_params(&self.params).build(img);
        let mask_pixels = mask.count_nonzero();
        log::debug!("greenness mask: {mask_pixels} pixels");
        if mask_pixels == 0 {
            return Err(DetectError::NoBackplaneDetected);
        }

        let (polygon, anchors) = self.locate_in_mask(&mask)?;
        let rectified = rectify_backplane(img, &anchors, &self.params)?;

        Ok(BackplaneDetection {
            polygon,
            anchors,
            rectified,
            mask_pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use backplane_core::RgbImage;
    use nalgebra::Point2;

    const GREEN: [u8; 3] = [30, 180, 30];
    const GRAY: [u8; 3] = [128, 128, 128];

    fn fill(img: &mut RgbImage, inside: impl Fn(f32, f32) -> bool, rgb: [u8; 3]) {
        for y in 0..img.height {
            for x in 0..img.width {
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    img.put_pixel(x, y, rgb);
                }
            }
        }
    }

    fn scene() -> RgbImage {
        let mut img = RgbImage::new(240, 200);
        fill(&mut img, |_, _| true, GRAY);
        fill(
            &mut img,
            |x, y| (40.0..200.0).contains(&x) && (30.0..150.0).contains(&y),
            GREEN,
        );
        img
    }

    #[test]
    fn detects_axis_aligned_backplane() {
        let img = scene();
        let det = BackplaneDetector::default().detect(&img.view()).unwrap();

        assert_eq!(det.polygon.len(), 4);
        assert_abs_diff_eq!(det.anchors.near, Point2::new(40.0, 30.0), epsilon = 1.5);
        assert_abs_diff_eq!(det.anchors.far, Point2::new(199.0, 149.0), epsilon = 1.5);
        assert!(det.anchors.bottom_left.x < det.anchors.top_right.x);
        assert!(det.anchors.bottom_left.y > det.anchors.top_right.y);

        let out = &det.rectified.image;
        assert!(out.width.abs_diff(160) <= 2, "width {}", out.width);
        assert!(out.height.abs_diff(120) <= 2, "height {}", out.height);
        assert_eq!(out.view().pixel(out.width / 2, out.height / 2), GREEN);
        assert_eq!(det.mask_pixels, 160 * 120);
    }

    #[test]
    fn locate_matches_detect() {
        let img = scene();
        let detector = BackplaneDetector::default();
        let (polygon, anchors) = detector.locate(&img.view()).unwrap();
        let det = detector.detect(&img.view()).unwrap();
        assert_eq!(polygon, det.polygon);
        assert_eq!(anchors, det.anchors);
    }

    #[test]
    fn triangle_has_too_few_anchors() {
        let mut img = RgbImage::new(200, 200);
        fill(&mut img, |_, _| true, GRAY);
        let inside = |x: f32, y: f32| y > 20.0 && y < 180.0 && (x - 100.0).abs() < (y - 20.0) * 0.5;
        fill(&mut img, inside, GREEN);
        let err = BackplaneDetector::default()
            .detect(&img.view())
            .unwrap_err();
        assert_eq!(err, DetectError::InsufficientAnchors { found: 3 });
    }

    #[test]
    fn gray_image_has_no_backplane() {
        let mut img = RgbImage::new(50, 40);
        fill(&mut img, |_, _| true, GRAY);
        let err = BackplaneDetector::default()
            .detect(&img.view())
            .unwrap_err();
        assert_eq!(err, DetectError::NoBackplaneDetected);
    }
}
