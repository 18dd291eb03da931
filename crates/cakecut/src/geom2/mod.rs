//! 2D geometry for the cake tray: edges, pieces, enclosing circles.
//!
//! Purpose
//! - Keep the geometric predicates the planner and the assignment code share in
//!   one place, with explicit tolerances (`cfg::FEAS_EPS`).
//! - Expose piece geometry and the enclosing-circle primitive as traits
//!   (`Shape`, `EnclosingCircle`) so callers can plug in engine-provided data
//!   or deterministic stubs.
//!
//! Code cross-refs: `plan::sneak` (edge helpers), `assign::plate` (circles).

pub mod edge;
mod enclosing;
mod types;
mod util;

pub use edge::{bounce, nearest_edge_x, nearest_edge_y, round2, round2_pos};
pub use enclosing::{Circle, EnclosingCircle, GeometryError, Welzl};
pub use types::{Piece, Shape, Tray, TrayError};
