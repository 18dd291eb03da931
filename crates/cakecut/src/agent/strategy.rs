//! Cutting strategies. Each is selected once, when the agent is built.

use nalgebra::Vector2;

use super::types::{Action, AgentCfg, Percept, TurnError};
use crate::assign::{Assigner, PenaltyModel, SwapDescent};
use crate::geom2::{round2, round2_pos, EnclosingCircle, Shape, Tray};
use crate::plan::{EvenCutScheduler, Phase, PlanState};

/// One way of playing a game, turn by turn.
pub trait Strategy {
    /// Knife placement for turn 1.
    fn init(&self) -> Vector2<f64>;

    /// Decide a turn after turn 1, updating `state` in place.
    fn decide<P: Shape, C: EnclosingCircle>(
        &self,
        percept: &Percept<'_, P>,
        cfg: &AgentCfg,
        model: &PenaltyModel<C>,
        state: &mut PlanState,
    ) -> Result<Action, TurnError>;
}

/// Tag naming a strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    #[default]
    Sneak,
    ClimbHills,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Sneak => "sneak",
            StrategyKind::ClimbHills => "climb_hills",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sneak" => Some(StrategyKind::Sneak),
            "climb_hills" => Some(StrategyKind::ClimbHills),
            _ => None,
        }
    }
}

/// Fallback cut: straight across to the other vertical edge, `step` further
/// along y (wrapping at the far edge).
pub fn nibble(knife: Vector2<f64>, tray: &Tray, step: f64) -> Vector2<f64> {
    let x = if knife.x == 0.0 { tray.width() } else { 0.0 };
    Vector2::new(x, round2((knife.y + step).rem_euclid(tray.length())))
}

/// Even grid via sneak paths, then the configured matcher.
#[derive(Clone, Copy, Debug, Default)]
pub struct SneakCuts;

impl Strategy for SneakCuts {
    fn init(&self) -> Vector2<f64> {
        Vector2::new(0.01, 0.0)
    }

    fn decide<P: Shape, C: EnclosingCircle>(
        &self,
        percept: &Percept<'_, P>,
        cfg: &AgentCfg,
        model: &PenaltyModel<C>,
        state: &mut PlanState,
    ) -> Result<Action, TurnError> {
        let p = percept;
        if !p.requests.is_empty() && state.queue.is_empty() && state.phase != Phase::Done {
            EvenCutScheduler::new(p.tray, p.requests.len())?
                .schedule(state, p.turn, p.knife);
        }
        if let Some(next) = state.queue.pop() {
            return Ok(Action::Cut(round2_pos(next)));
        }
        if p.pieces.len() < p.requests.len() {
            return Ok(Action::Cut(nibble(p.knife, &p.tray, cfg.nibble_step)));
        }
        let assignment = cfg.assign_method.assign(p.pieces, p.requests, model)?;
        Ok(Action::Assign(assignment))
    }
}

/// Nibble strips until there are enough pieces, then hill-climb the matching.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClimbHills;

impl Strategy for ClimbHills {
    fn init(&self) -> Vector2<f64> {
        Vector2::zeros()
    }

    fn decide<P: Shape, C: EnclosingCircle>(
        &self,
        percept: &Percept<'_, P>,
        cfg: &AgentCfg,
        model: &PenaltyModel<C>,
        _state: &mut PlanState,
    ) -> Result<Action, TurnError> {
        let p = percept;
        if p.pieces.len() < p.requests.len() {
            return Ok(Action::Cut(nibble(p.knife, &p.tray, cfg.nibble_step)));
        }
        let assignment = SwapDescent::default().assign(p.pieces, p.requests, model)?;
        Ok(Action::Assign(assignment))
    }
}
