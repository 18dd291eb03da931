//! Minimal enclosing circle: capability trait plus a Welzl reference solver.
//!
//! The plate-fit check only needs a radius, so the trait exposes just that;
//! `Welzl::circle` also returns the center for diagnostics and tests.
//!
//! Model
//! - Randomized incremental construction (move-to-front Welzl) over the convex
//!   hull of the input. Expected linear time; the shuffle is seeded so results
//!   are reproducible.
//! - Degenerate input (one point, two points, collinear points) is handled by
//!   the point / diameter circles. Only empty or non-finite input is an error.

use std::fmt;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::util::convex_hull;

/// Failure of the enclosing-circle primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryError {
    /// No points to enclose.
    Empty,
    /// A coordinate is NaN or infinite.
    NonFinite { index: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Empty => write!(f, "cannot enclose an empty point set"),
            GeometryError::NonFinite { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Anything that can report the radius of the smallest circle around a point set.
pub trait EnclosingCircle {
    fn enclosing_radius(&self, points: &[Vector2<f64>]) -> Result<f64, GeometryError>;
}

/// Closed disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Circle {
    #[inline]
    fn point(p: Vector2<f64>) -> Self {
        Self {
            center: p,
            radius: 0.0,
        }
    }

    #[inline]
    fn diameter(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self {
            center: (a + b) * 0.5,
            radius: (a - b).norm() * 0.5,
        }
    }

    /// Circumcircle, or the widest pair circle if the points are collinear.
    fn through3(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> Self {
        let ab = b - a;
        let ac = c - a;
        let bb = ab.norm_squared();
        let cc = ac.norm_squared();
        let d = 2.0 * (ab.x * ac.y - ab.y * ac.x);
        if d.abs() <= 1e-12 * (bb + cc).max(1.0) {
            let pairs = [(a, b), (a, c), (b, c)];
            return pairs
                .into_iter()
                .map(|(p, q)| Self::diameter(p, q))
                .max_by(|x, y| x.radius.total_cmp(&y.radius))
                .unwrap_or_else(|| Self::point(a));
        }
        let u = Vector2::new((ac.y * bb - ab.y * cc) / d, (ab.x * cc - ac.x * bb) / d);
        Self {
            center: a + u,
            radius: u.norm(),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        (p - self.center).norm() <= self.radius + 1e-9 * (1.0 + self.radius)
    }
}

/// Reference solver. `seed` fixes the shuffle order.
#[derive(Clone, Copy, Debug)]
pub struct Welzl {
    pub seed: u64,
}

impl Default for Welzl {
    fn default() -> Self {
        Self { seed: 0x00c0_ffee }
    }
}

impl Welzl {
    pub fn circle(&self, points: &[Vector2<f64>]) -> Result<Circle, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::Empty);
        }
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeometryError::NonFinite { index });
        }
        let mut pts = convex_hull(points);
        pts.shuffle(&mut StdRng::seed_from_u64(self.seed));

        let mut c = Circle::point(pts[0]);
        for i in 1..pts.len() {
            if c.contains(pts[i]) {
                continue;
            }
            c = Circle::point(pts[i]);
            for j in 0..i {
                if c.contains(pts[j]) {
                    continue;
                }
                c = Circle::diameter(pts[i], pts[j]);
                for k in 0..j {
                    if !c.contains(pts[k]) {
                        c = Circle::through3(pts[i], pts[j], pts[k]);
                    }
                }
            }
        }
        Ok(c)
    }
}

impl EnclosingCircle for Welzl {
    fn enclosing_radius(&self, points: &[Vector2<f64>]) -> Result<f64, GeometryError> {
        self.circle(points).map(|c| c.radius)
    }
}
