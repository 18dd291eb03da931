//! Plate-fit predicate: does a piece fit on the serving plate?

use crate::cfg::{FEAS_EPS, PLATE_RADIUS};
use crate::geom2::{EnclosingCircle, GeometryError, Shape, Welzl};

/// Circular plate of fixed radius plus the enclosing-circle primitive used to
/// test pieces against it.
#[derive(Clone, Copy, Debug)]
pub struct PlateFit<C = Welzl> {
    pub radius: f64,
    circle: C,
}

impl PlateFit<Welzl> {
    pub fn new(radius: f64) -> Self {
        Self::with_circle(radius, Welzl::default())
    }
}

impl Default for PlateFit<Welzl> {
    fn default() -> Self {
        Self::new(PLATE_RADIUS)
    }
}

impl<C: EnclosingCircle> PlateFit<C> {
    pub fn with_circle(radius: f64, circle: C) -> Self {
        Self { radius, circle }
    }

    /// True iff the piece's minimal enclosing circle fits inside the plate.
    /// Primitive failures are returned, never read as "fits".
    pub fn fits<P: Shape + ?Sized>(&self, piece: &P) -> Result<bool, GeometryError> {
        let r = self.circle.enclosing_radius(piece.boundary())?;
        Ok(r <= self.radius + FEAS_EPS)
    }
}
