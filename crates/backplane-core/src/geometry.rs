use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Closed polygon in pixel coordinates; the last vertex connects to the first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point2<f32>>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2<f32>>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Absolute shoelace area. Winding does not matter.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64
            })
            .sum();
        0.5 * twice.abs()
    }

    /// Closed perimeter length.
    pub fn perimeter(&self) -> f64 {
        let n = self.vertices.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| (self.vertices[(i + 1) % n] - self.vertices[i]).norm() as f64)
            .sum()
    }

    /// Douglas–Peucker simplification of the closed outline.
    ///
    /// The outline is split at two mutually distant vertices (the vertex
    /// farthest from the first one, then the vertex farthest from that), so no
    /// vertex is pinned to wherever tracing happened to start. Each half is
    /// simplified as an open chain with tolerance `epsilon` in pixels.
    pub fn simplify(&self, epsilon: f64) -> Polygon {
        let pts = &self.vertices;
        let n = pts.len();
        if n < 3 {
            return self.clone();
        }

        let farthest_from = |k: usize| {
            (0..n)
                .max_by(|&a, &b| dist(pts[k], pts[a]).total_cmp(&dist(pts[k], pts[b])))
                .unwrap_or(k)
        };
        let a = farthest_from(0);
        let b = farthest_from(a);
        if a == b {
            return Polygon::new(vec![pts[a]]);
        }

        let chain = |from: usize, to: usize| -> Vec<Point2<f32>> {
            let len = (to + n - from) % n + 1;
            (0..len).map(|i| pts[(from + i) % n]).collect()
        };

        let mut out = Vec::new();
        for (from, to) in [(a, b), (b, a)] {
            let c = chain(from, to);
            let keep = simplify_open(&c, epsilon);
            // the last kept point opens the next chain
            out.extend(keep[..keep.len() - 1].iter().map(|&i| c[i]));
        }
        Polygon::new(out)
    }
}

#[inline]
fn dist(a: Point2<f32>, b: Point2<f32>) -> f64 {
    (b - a).norm() as f64
}

fn segment_distance(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f64 {
    let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let len = dx.hypot(dy);
    if len < 1e-12 {
        return dist(a, p);
    }
    (dx * (a.y - p.y) as f64 - dy * (a.x - p.x) as f64).abs() / len
}

/// Indices of kept points for an open chain; both endpoints are always kept.
fn simplify_open(chain: &[Point2<f32>], epsilon: f64) -> Vec<usize> {
    let last = chain.len() - 1;
    let mut keep = vec![false; chain.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((lo, hi)) = stack.pop() {
        if hi <= lo + 1 {
            continue;
        }
        let (mut dmax, mut idx) = (0.0, lo);
        for i in lo + 1..hi {
            let d = segment_distance(chain[i], chain[lo], chain[hi]);
            if d > dmax {
                dmax = d;
                idx = i;
            }
        }
        if dmax > epsilon {
            keep[idx] = true;
            stack.push((lo, idx));
            stack.push((idx, hi));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}
