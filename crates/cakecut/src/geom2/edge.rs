//! Nearest-edge and bounce-offset helpers for knife positions.
//!
//! Tie-break: a position exactly halfway between two edges is assigned to the
//! low edge (`0`). The sneak planner relies on this being deterministic.

use nalgebra::Vector2;

use crate::cfg::BOUNCE_INSET;

/// Nearer of the vertical edges `{0, width}` to `pos.x`, with its distance.
#[inline]
pub fn nearest_edge_x(pos: Vector2<f64>, width: f64) -> (f64, f64) {
    nearest_of(pos.x, width)
}

/// Nearer of the horizontal edges `{0, length}` to `pos.y`, with its distance.
#[inline]
pub fn nearest_edge_y(pos: Vector2<f64>, length: f64) -> (f64, f64) {
    nearest_of(pos.y, length)
}

#[inline]
fn nearest_of(v: f64, far: f64) -> (f64, f64) {
    let to_far = far - v;
    if to_far < v {
        (far, to_far)
    } else {
        (0.0, v)
    }
}

/// Coordinate `BOUNCE_INSET` inside the tray from the edge at `margin`.
///
/// `bounce(0) == 0.01`, `bounce(100) == 99.99`.
#[inline]
pub fn bounce(margin: f64) -> f64 {
    if margin == 0.0 {
        return BOUNCE_INSET;
    }
    round2(margin - BOUNCE_INSET)
}

/// Round to two decimals, the precision the engine accepts for knife targets.
#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `round2` applied per coordinate.
#[inline]
pub fn round2_pos(p: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(round2(p.x), round2(p.y))
}
