use backplane_core::{GrayImage, Polygon};
use imageproc::contours::{find_contours, Contour};
use nalgebra::Point2;

use crate::DetectError;

/// Find the largest simplified polygon among all contours of `mask`.
///
/// Every border (outer or hole) is traced as a flat list. Each is simplified
/// with Douglas–Peucker at `simplify_ratio * perimeter`, and the polygon with
/// the strictly largest absolute area is returned; zero-area polygons never
/// win.
pub fn find_largest_polygon(
    mask: &GrayImage,
    simplify_ratio: f64,
) -> Result<Polygon, DetectError> {
    let (w, h) = (mask.width as u32, mask.height as u32);
    let buf = ::image::GrayImage::from_raw(w, h, mask.data.clone())
        .ok_or(DetectError::NoBackplaneDetected)?;
    let contours: Vec<Contour<i32>> = find_contours(&buf);

    let mut best: Option<(f64, Polygon)> = None;
    for contour in contours.iter().filter(|c| c.points.len() >= 3) {
        let outline = Polygon::new(
            contour
                .points
                .iter()
                .map(|p| Point2::new(p.x as f32, p.y as f32))
                .collect(),
        );
        let polygon = outline.simplify(outline.perimeter() * simplify_ratio);

        let area = polygon.area();
        if area > best.as_ref().map_or(0.0, |(a, _)| *a) {
            best = Some((area, polygon));
        }
    }

    log::debug!(
        "traced {} contours, largest simplified area {:.1}",
        contours.len(),
        best.as_ref().map_or(0.0, |(a, _)| *a)
    );

    best.map(|(_, p)| p).ok_or(DetectError::NoBackplaneDetected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SIMPLIFY_RATIO;

    fn blank(w: usize, h: usize) -> GrayImage {
        GrayImage {
            width: w,
            height: h,
            data: vec![0; w * h],
        }
    }

    fn fill_rect(mask: &mut GrayImage, x0: usize, y0: usize, w: usize, h: usize) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.data[y * mask.width + x] = 255;
            }
        }
    }

    // Fill pixels whose center lies inside the convex quad (consistent winding).
    fn fill_convex(mask: &mut GrayImage, quad: [Point2<f32>; 4]) {
        for y in 0..mask.height {
            for x in 0..mask.width {
                let p = Point2::new(x as f32, y as f32);
                let signs: Vec<f32> = (0..4)
                    .map(|i| {
                        let a = quad[i];
                        let b = quad[(i + 1) % 4];
                        (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
                    })
                    .collect();
                if signs.iter().all(|&s| s >= 0.0) || signs.iter().all(|&s| s <= 0.0) {
                    mask.data[y * mask.width + x] = 255;
                }
            }
        }
    }

    #[test]
    fn empty_mask_has_no_backplane() {
        let err = find_largest_polygon(&blank(32, 32), DEFAULT_SIMPLIFY_RATIO).unwrap_err();
        assert_eq!(err, DetectError::NoBackplaneDetected);
    }

    #[test]
    fn rectangle_blob_simplifies_to_four_vertices() {
        let mut mask = blank(100, 80);
        fill_rect(&mut mask, 10, 20, 60, 40);

        let poly = find_largest_polygon(&mask, DEFAULT_SIMPLIFY_RATIO).unwrap();
        assert_eq!(poly.len(), 4);
        // contour runs through boundary pixel centers: (60-1) x (40-1)
        assert!((poly.area() - 59.0 * 39.0).abs() < 1.0);
    }

    #[test]
    fn rotated_quad_area_matches_blob() {
        let mut mask = blank(200, 200);
        let quad = [
            Point2::new(60.0, 20.0),
            Point2::new(180.0, 60.0),
            Point2::new(140.0, 180.0),
            Point2::new(20.0, 140.0),
        ];
        fill_convex(&mut mask, quad);
        let blob_area = mask.count_nonzero() as f64;

        let poly = find_largest_polygon(&mask, DEFAULT_SIMPLIFY_RATIO).unwrap();
        assert!((4..=6).contains(&poly.len()), "got {} vertices", poly.len());
        let rel = (poly.area() - blob_area).abs() / blob_area;
        assert!(rel < 0.05, "area {} vs blob {}", poly.area(), blob_area);
    }

    #[test]
    fn larger_blob_wins() {
        let mut mask = blank(120, 60);
        fill_rect(&mut mask, 5, 5, 20, 20);
        fill_rect(&mut mask, 40, 5, 50, 40);
        fill_rect(&mut mask, 100, 40, 10, 10);

        let poly = find_largest_polygon(&mask, DEFAULT_SIMPLIFY_RATIO).unwrap();
        assert!((poly.area() - 49.0 * 39.0).abs() < 1.0);
        assert!(poly.vertices.iter().all(|p| p.x >= 40.0 && p.x < 90.0));
    }
}
