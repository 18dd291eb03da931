//! Scheduler state: phase, sweep direction and the pending move queue.
//!
//! Kept as one owned value (`PlanState`) that the turn function takes and
//! hands back, so a turn can be replayed from any saved state.

use std::collections::VecDeque;

use nalgebra::Vector2;

use crate::geom2::Tray;

/// Which sweep the scheduler is executing. Ordered: transitions only go forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    #[default]
    Horizontal,
    Vertical,
    Done,
}

/// Side the vertical sweep started from.
///
/// `Left` advances by `+s_x` from `x = 0`; `Right` by `-s_x` from `x = W`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Undetermined,
    Left,
    Right,
}

/// FIFO of knife targets computed ahead of the current turn.
///
/// Invariants:
/// - No two consecutive entries are equal (a repeated tail push is dropped).
/// - Every entry lies inside the tray; violating this panics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveQueue {
    moves: VecDeque<Vector2<f64>>,
}

impl MoveQueue {
    pub fn push(&mut self, tray: &Tray, p: Vector2<f64>) {
        assert!(
            tray.contains(p),
            "knife target ({}, {}) outside tray {} x {}",
            p.x,
            p.y,
            tray.width(),
            tray.length()
        );
        if self.moves.back() == Some(&p) {
            return;
        }
        self.moves.push_back(p);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Vector2<f64>> {
        self.moves.pop_front()
    }

    #[inline]
    pub fn peek(&self) -> Option<&Vector2<f64>> {
        self.moves.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector2<f64>> {
        self.moves.iter()
    }
}

/// Per-game agent state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanState {
    pub phase: Phase,
    pub direction: Direction,
    pub queue: MoveQueue,
    /// Set once the final assignment has been emitted.
    pub assigned: bool,
}

impl PlanState {
    /// Move to a later phase. Going backwards (or staying) is a logic error.
    pub fn enter(&mut self, next: Phase) {
        assert!(
            next > self.phase,
            "phase may only advance: {:?} -> {:?}",
            self.phase,
            next
        );
        tracing::debug!(from = ?self.phase, to = ?next, "phase");
        self.phase = next;
    }
}
