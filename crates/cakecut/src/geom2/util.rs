use nalgebra::Vector2;

/// Signed shoelace area of a point ring (CCW positive). An explicit closing
/// point is allowed and contributes nothing.
pub(crate) fn shoelace_area(points: &[Vector2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for k in 0..points.len() {
        let p = points[k];
        let q = points[(k + 1) % points.len()];
        twice += p.x * q.y - q.x * p.y;
    }
    0.5 * twice
}

/// Andrew’s monotone chain convex hull (CCW, collinear points dropped).
/// Returns fewer than 3 points when the input is degenerate.
pub(crate) fn convex_hull(points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while turns_clockwise(&lower, *p) {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while turns_clockwise(&upper, *p) {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// The last two chain points and `p` do not turn left.
fn turns_clockwise(chain: &[Vector2<f64>], p: Vector2<f64>) -> bool {
    let n = chain.len();
    n >= 2 && cross(chain[n - 2], chain[n - 1], p) <= 0.0
}

#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
