//! Boundary-hugging knife paths ("sneak").
//!
//! A straight move along an edge the knife already touches would retrace a
//! previous cut, which the engine rejects as zero-area. The planner instead
//! ricochets off points `BOUNCE_INSET` inside the tray, so each sub-cut shaves
//! a sliver of nonzero but minimal width while the knife travels to `end`.
//!
//! Cases (by the edge `start` sits on):
//! - horizontal edge, real move needed: bounce along it to `end`'s x-edge,
//!   then off the corner, then (if `end` is on the opposite horizontal edge)
//!   across and back onto it. 1–4 sub-cuts before `end`.
//! - vertical edge: the same with axes swapped.
//! - otherwise: straight to `end`.

use nalgebra::Vector2;

use super::types::MoveQueue;
use crate::cfg::MIN_MOVE;
use crate::geom2::{bounce, nearest_edge_x, nearest_edge_y, Tray};

/// Append the moves that take the knife from `start` to `end`; the last
/// appended position is always `end`.
pub fn sneak(start: Vector2<f64>, end: Vector2<f64>, tray: &Tray, queue: &mut MoveQueue) {
    let before = queue.len();
    if start == end {
        queue.push(tray, end);
        return;
    }
    let (w, l) = (tray.width(), tray.length());
    let (near_x, x_dist) = nearest_edge_x(start, w);
    let (near_y, y_dist) = nearest_edge_y(start, l);
    let (end_x, end_x_dist) = nearest_edge_x(end, w);
    let (end_y, end_y_dist) = nearest_edge_y(end, l);

    if y_dist == 0.0 && (x_dist > MIN_MOVE || near_x != end_x) {
        let by = bounce(near_y);
        queue.push(tray, Vector2::new(end_x, by));
        if end_y_dist > 0.0 || near_y != end_y {
            let bx = bounce(end_x);
            queue.push(tray, Vector2::new(bx, near_y));
            if end_y_dist == 0.0 {
                queue.push(tray, Vector2::new(bx, end_y));
                queue.push(tray, Vector2::new(end_x, bounce(end_y)));
            }
        }
    } else if x_dist == 0.0 && (y_dist > MIN_MOVE || near_y != end_y) {
        let bx = bounce(near_x);
        queue.push(tray, Vector2::new(bx, end_y));
        if end_x_dist > 0.0 || near_x != end_x {
            let by = bounce(end_y);
            queue.push(tray, Vector2::new(near_x, by));
            if end_x_dist == 0.0 {
                queue.push(tray, Vector2::new(end_x, by));
                queue.push(tray, Vector2::new(bounce(end_x), end_y));
            }
        }
    }
    queue.push(tray, end);
    tracing::debug!(
        from = ?(start.x, start.y),
        to = ?(end.x, end.y),
        moves = queue.len() - before,
        "sneak"
    );
}
