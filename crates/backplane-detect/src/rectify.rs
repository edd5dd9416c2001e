use backplane_core::{
    homography_from_4pt, warp_perspective_rgb, Homography, RgbImage, RgbImageView,
};
use nalgebra::Point2;

use crate::{AnchorSet, DetectError, DetectParams};

/// Rectified backplane image plus the mappings between both pixel spaces.
#[derive(Clone, Debug)]
pub struct RectifiedBackplane {
    pub image: RgbImage,
    pub anchors: AnchorSet,
    /// Maps rectified pixels into the source image.
    pub h_img_from_rect: Homography,
    /// Maps source pixels into the rectified image.
    pub h_rect_from_img: Homography,
}

/// Output size `(width, height)` from the detected edge lengths.
///
/// Width follows the `bottom_left → far` edge, height the
/// `near → bottom_left` edge; both are truncated to whole pixels.
pub fn rectified_size(anchors: &AnchorSet) -> (usize, usize) {
    let width = (anchors.far - anchors.bottom_left).norm();
    let height = (anchors.bottom_left - anchors.near).norm();
    (width as usize, height as usize)
}

/// Rectify using the aspect ratio of the detected quad.
pub fn rectify_backplane(
    src: &RgbImageView<'_>,
    anchors: &AnchorSet,
    params: &DetectParams,
) -> Result<RectifiedBackplane, DetectError> {
    let (w, h) = rectified_size(anchors);
    rectify_to_size(src, anchors, w, h, params)
}

/// Warp the quad spanned by `anchors` onto a `width × height` rectangle.
///
/// Anchors map to `(0,0)`, `(0,h)`, `(w,h)`, `(w,0)` in their canonical order.
pub fn rectify_to_size(
    src: &RgbImageView<'_>,
    anchors: &AnchorSet,
    width: usize,
    height: usize,
    params: &DetectParams,
) -> Result<RectifiedBackplane, DetectError> {
    anchors.validate(params.min_anchor_separation, params.collinear_rel_tol)?;
    if width == 0 || height == 0 {
        return Err(DetectError::DegenerateHomography {
            reason: "rectified size is empty",
        });
    }

    let (w, h) = (width as f32, height as f32);
    let rect_corners = [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, h),
        Point2::new(w, h),
        Point2::new(w, 0.0),
    ];

    let h_rect_from_img = homography_from_4pt(&anchors.to_array(), &rect_corners)
        .filter(|hm| hm.is_non_singular(params.min_determinant))
        .ok_or(DetectError::DegenerateHomography {
            reason: "anchor-to-rectangle system is singular",
        })?;
    let h_img_from_rect = h_rect_from_img
        .inverse()
        .ok_or(DetectError::DegenerateHomography {
            reason: "homography is not invertible",
        })?;

    let image = warp_perspective_rgb(src, &h_img_from_rect, width, height);
    log::debug!("rectified backplane to {width}x{height}");

    Ok(RectifiedBackplane {
        image,
        anchors: *anchors,
        h_img_from_rect,
        h_rect_from_img,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix3;

    fn checkerboard(w: usize, h: usize, cell: usize) -> RgbImage {
        let mut img = RgbImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let on = (x / cell + y / cell) % 2 == 0;
                img.put_pixel(x, y, if on { [250, 40, 40] } else { [30, 30, 200] });
            }
        }
        img
    }

    // Forward-warp `rect` into a `size × size` scene with `h_img_from_rect`.
    fn render_scene(rect: &RgbImage, h_img_from_rect: &Homography, size: usize) -> RgbImage {
        let inv = h_img_from_rect.inverse().unwrap();
        warp_perspective_rgb(&rect.view(), &inv, size, size)
    }

    #[test]
    fn size_follows_edge_lengths() {
        let anchors = AnchorSet::from_array([
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 70.5),
            Point2::new(130.9, 70.5),
            Point2::new(130.9, 10.0),
        ]);
        assert_eq!(rectified_size(&anchors), (120, 60));
    }

    #[test]
    fn round_trip_recovers_corners() {
        let (rw, rh) = (160usize, 100usize);
        let rect = checkerboard(rw, rh, 20);

        // rotation + translation + mild perspective
        let (s, c) = 12.0_f64.to_radians().sin_cos();
        let truth = Homography::new(Matrix3::new(
            c, -s, 120.0, //
            s, c, 60.0, //
            2e-5, -1e-5, 1.0,
        ));
        let scene = render_scene(&rect, &truth, 400);

        let rect_corners = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, rh as f32),
            Point2::new(rw as f32, rh as f32),
            Point2::new(rw as f32, 0.0),
        ];
        let anchors = AnchorSet::from_array(rect_corners.map(|p| truth.apply(p)));

        let out = rectify_backplane(&scene.view(), &anchors, &DetectParams::default()).unwrap();
        assert!(out.image.width.abs_diff(rw) <= 2, "width {}", out.image.width);
        assert!(out.image.height.abs_diff(rh) <= 2, "height {}", out.image.height);

        let (w, h) = (out.image.width as f32, out.image.height as f32);
        let dst = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, h),
            Point2::new(w, h),
            Point2::new(w, 0.0),
        ];
        for (a, d) in anchors.to_array().into_iter().zip(dst) {
            let mapped = out.h_rect_from_img.apply(a);
            assert!((mapped - d).norm() <= 2.0, "{mapped:?} vs {d:?}");
            let back = out.h_img_from_rect.apply(d);
            assert!((back - a).norm() <= 2.0, "{back:?} vs {a:?}");
        }

        // interior colors survive the double warp
        for (x, y) in [(10, 10), (30, 10), (50, 70), (150, 90)] {
            let want = rect.view().pixel(x, y);
            let got = out.image.view().pixel(x, y);
            let diff: i32 = (0..3).map(|i| (want[i] as i32 - got[i] as i32).abs()).sum();
            assert!(diff < 60, "pixel ({x},{y}): {got:?} vs {want:?}");
        }
    }

    #[test]
    fn collinear_anchors_are_degenerate() {
        let img = RgbImage::new(50, 50);
        let anchors = AnchorSet::from_array([
            Point2::new(5.0, 5.0),
            Point2::new(15.0, 15.0),
            Point2::new(25.0, 25.0),
            Point2::new(35.0, 35.0),
        ]);
        let err = rectify_backplane(&img.view(), &anchors, &DetectParams::default()).unwrap_err();
        assert!(matches!(err, DetectError::DegenerateHomography { .. }));
    }

    #[test]
    fn concave_anchors_are_degenerate() {
        let img = RgbImage::new(400, 400);
        let anchors = AnchorSet::from_array([
            Point2::new(100.0, 100.0),
            Point2::new(100.0, 300.0),
            Point2::new(300.0, 300.0),
            Point2::new(110.0, 118.0),
        ]);
        let err = rectify_backplane(&img.view(), &anchors, &DetectParams::default()).unwrap_err();
        assert_eq!(
            err,
            DetectError::DegenerateHomography {
                reason: "anchors do not form a convex quad",
            }
        );
    }

    #[test]
    fn empty_size_is_degenerate() {
        let img = RgbImage::new(50, 50);
        let anchors = AnchorSet::from_array([
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 40.0),
            Point2::new(40.0, 40.0),
            Point2::new(40.0, 5.0),
        ]);
        let err =
            rectify_to_size(&img.view(), &anchors, 0, 10, &DetectParams::default()).unwrap_err();
        assert!(matches!(err, DetectError::DegenerateHomography { .. }));
    }
}
