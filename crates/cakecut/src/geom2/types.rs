//! Tray and piece types shared by planning and assignment.
//!
//! - `Tray`: the rectangular cake, origin at one corner, fixed for a game.
//! - `Shape`: capability trait for a produced piece (area + boundary points).
//! - `Piece`: reference `Shape` backed by a point ring (area via shoelace).

use std::fmt;

use nalgebra::Vector2;

use super::util::shoelace_area;
use crate::cfg::FEAS_EPS;

/// Rejected tray dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrayError {
    /// Width or length is zero, negative, or not finite.
    InvalidSize { width: f64, length: f64 },
}

impl fmt::Display for TrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrayError::InvalidSize { width, length } => write!(
                f,
                "tray must have positive finite size, got {width} x {length}"
            ),
        }
    }
}

impl std::error::Error for TrayError {}

/// Rectangular tray `[0, W] × [0, L]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tray {
    width: f64,
    length: f64,
}

impl Tray {
    pub fn new(width: f64, length: f64) -> Result<Self, TrayError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(width) && ok(length)) {
            return Err(TrayError::InvalidSize { width, length });
        }
        Ok(Self { width, length })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Closed-rectangle membership with `FEAS_EPS` slack.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x >= -FEAS_EPS
            && p.x <= self.width + FEAS_EPS
            && p.y >= -FEAS_EPS
            && p.y <= self.length + FEAS_EPS
    }

    /// True if `p` lies in the tray and on one of its four edges.
    pub fn on_boundary(&self, p: Vector2<f64>) -> bool {
        if !self.contains(p) {
            return false;
        }
        let near = |a: f64, b: f64| (a - b).abs() <= FEAS_EPS;
        near(p.x, 0.0) || near(p.x, self.width) || near(p.y, 0.0) || near(p.y, self.length)
    }
}

/// What the core needs to know about a produced piece.
///
/// The engine owns polygon construction; tests substitute plain stubs.
pub trait Shape {
    fn area(&self) -> f64;
    fn boundary(&self) -> &[Vector2<f64>];
}

/// A piece as a closed ring of boundary points (closing point optional).
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    points: Vec<Vector2<f64>>,
    area: f64,
}

impl Piece {
    pub fn new(points: Vec<Vector2<f64>>) -> Self {
        let area = shoelace_area(&points).abs();
        Self { points, area }
    }

    /// Axis-aligned rectangle with corners `lo` and `hi`.
    pub fn rect(lo: Vector2<f64>, hi: Vector2<f64>) -> Self {
        let corners = vec![lo, Vector2::new(hi.x, lo.y), hi, Vector2::new(lo.x, hi.y)];
        Self::new(corners)
    }
}

impl Shape for Piece {
    #[inline]
    fn area(&self) -> f64 {
        self.area
    }
    #[inline]
    fn boundary(&self) -> &[Vector2<f64>] {
        &self.points
    }
}
