//! Cut planning: sneak paths and the even-partition schedule.
//!
//! Purpose
//! - Decide, one turn at a time, where the knife goes next so that the tray
//!   ends up split into an even grid, without ever issuing a zero-area cut.
//!
//! Layout
//! - `types.rs`: `Phase`, `Direction`, `MoveQueue`, `PlanState`.
//! - `sneak.rs`: boundary-hugging paths between two knife positions.
//! - `schedule.rs`: the phase machine that picks the next strip boundary.

mod schedule;
mod sneak;
mod types;

pub use schedule::{even_cut_sequence, EvenCutScheduler, ScheduleError};
pub use sneak::sneak;
pub use types::{Direction, MoveQueue, Phase, PlanState};

#[cfg(test)]
mod tests;
