//! Fixed game constants (internal defaults).
//!
//! Policy
//! - Values mirror the game rules and are not tuned per run. Anything a caller
//!   may reasonably vary lives in `AgentCfg` instead.

/// Inset used by bounce points: 0.01 units inside the tray boundary.
pub const BOUNCE_INSET: f64 = 0.01;
/// A knife already within this distance of the target x-edge needs no detour.
pub const MIN_MOVE: f64 = 0.1;
/// Serving plate radius (diameter 25).
pub const PLATE_RADIUS: f64 = 12.5;
/// Penalty charged for an unassigned request or a piece that misses the plate.
pub const MISS_PENALTY: f64 = 100.0;
/// y-offset of the fallback nibble cut.
pub const NIBBLE_STEP: f64 = 5.0;
/// Slack for boundary membership and plate-fit comparisons.
pub(crate) const FEAS_EPS: f64 = 1e-9;
