//! Even-partition cut scheduler.
//!
//! Splits the tray into a `√n × √n` grid of equal strips (`s_x = W/√n`,
//! `s_y = L/√n`), one full-width horizontal cut at a time, then one
//! full-length vertical cut at a time. Each call looks only at the current
//! knife position and the phase, so per-turn work is O(1) and a whole game is
//! O(strip count).
//!
//! The strip count ignores how unequal the requested areas are.

use std::fmt;

use nalgebra::Vector2;

use super::sneak::sneak;
use super::types::{Direction, Phase, PlanState};
use crate::geom2::{round2, round2_pos, Tray};

/// Inputs the scheduler cannot turn into strips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScheduleError {
    /// No requests: the strip size `W/√0` is undefined.
    NoRequests,
    /// Strips narrower than the 0.01 coordinate grid cannot be cut.
    StripTooNarrow { strip_x: f64, strip_y: f64 },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::NoRequests => write!(f, "cannot schedule cuts for zero requests"),
            ScheduleError::StripTooNarrow { strip_x, strip_y } => write!(
                f,
                "strip size {strip_x} x {strip_y} is below the 0.01 cut resolution"
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Strip geometry for one tray and request count.
#[derive(Clone, Copy, Debug)]
pub struct EvenCutScheduler {
    tray: Tray,
    strip: Vector2<f64>,
}

impl EvenCutScheduler {
    pub fn new(tray: Tray, requests: usize) -> Result<Self, ScheduleError> {
        if requests == 0 {
            return Err(ScheduleError::NoRequests);
        }
        let k = (requests as f64).sqrt();
        let strip = Vector2::new(tray.width() / k, tray.length() / k);
        if strip.x < 0.01 || strip.y < 0.01 {
            return Err(ScheduleError::StripTooNarrow {
                strip_x: strip.x,
                strip_y: strip.y,
            });
        }
        Ok(Self { tray, strip })
    }

    /// `(s_x, s_y)`.
    #[inline]
    pub fn strip(&self) -> Vector2<f64> {
        self.strip
    }

    /// Queue the next strip-dividing cut (with its sneak path) for this turn.
    ///
    /// No-op while moves are still queued or once the phase is `Done`. On the
    /// vertical sweep's exit this only flips the phase and queues nothing.
    pub fn schedule(&self, state: &mut PlanState, turn: u32, pos: Vector2<f64>) {
        if !state.queue.is_empty() || state.phase == Phase::Done {
            return;
        }
        let tray = &self.tray;
        let (w, l) = (tray.width(), tray.length());
        let (s_x, s_y) = (self.strip.x, self.strip.y);

        if turn == 2 {
            state.queue.push(tray, Vector2::new(0.0, s_y));
            state.queue.push(tray, Vector2::new(w, s_y));
            return;
        }

        match state.phase {
            Phase::Horizontal if pos.y + s_y >= l => {
                state.enter(Phase::Vertical);
                let new_x = if pos.x == 0.0 {
                    state.direction = Direction::Left;
                    s_x
                } else {
                    state.direction = Direction::Right;
                    w - s_x
                };
                sneak(pos, Vector2::new(new_x, l), tray, &mut state.queue);
                state.queue.push(tray, Vector2::new(new_x, 0.0));
            }
            Phase::Horizontal => {
                let y = pos.y + s_y;
                sneak(pos, Vector2::new(pos.x, y), tray, &mut state.queue);
                let opposite = if pos.x == 0.0 { w } else { 0.0 };
                state.queue.push(tray, Vector2::new(opposite, round2(y)));
            }
            Phase::Vertical => {
                let new_x = match state.direction {
                    Direction::Right => pos.x - s_x,
                    _ => pos.x + s_x,
                };
                if new_x <= 0.0 || new_x >= w {
                    state.enter(Phase::Done);
                    return;
                }
                sneak(pos, Vector2::new(new_x, pos.y), tray, &mut state.queue);
                let opposite = if pos.y == 0.0 { l } else { 0.0 };
                state.queue.push(tray, Vector2::new(new_x, opposite));
            }
            Phase::Done => {}
        }
    }
}

/// Replay the whole schedule offline: starting with the knife at `init` on
/// turn 1, feed every emitted (rounded) target back as the next knife
/// position until the scheduler reports `Done`. Returns the cut targets in
/// order.
pub fn even_cut_sequence(
    tray: Tray,
    requests: usize,
    init: Vector2<f64>,
) -> Result<Vec<Vector2<f64>>, ScheduleError> {
    let scheduler = EvenCutScheduler::new(tray, requests)?;
    let mut state = PlanState::default();
    let mut pos = init;
    let mut turn = 2u32;
    let mut cuts = Vec::new();
    loop {
        scheduler.schedule(&mut state, turn, pos);
        match state.queue.pop() {
            Some(next) => {
                pos = round2_pos(next);
                cuts.push(pos);
                turn += 1;
            }
            None => break,
        }
    }
    Ok(cuts)
}
