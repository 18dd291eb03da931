//! Turn handler: percept in, action out.
//!
//! `Agent::turn` is pure with respect to its inputs: it reads the previous
//! `PlanState` and returns the next one alongside the action, so the engine
//! bridge decides where state lives between turns.

mod strategy;
mod types;

pub use strategy::{nibble, ClimbHills, SneakCuts, Strategy, StrategyKind};
pub use types::{Action, AgentCfg, Percept, TurnError};

use crate::assign::{PenaltyModel, PlateFit};
use crate::geom2::{EnclosingCircle, Shape, Welzl};
use crate::plan::PlanState;

/// A configured player.
#[derive(Clone, Copy, Debug)]
pub struct Agent<C = Welzl> {
    kind: StrategyKind,
    cfg: AgentCfg,
    model: PenaltyModel<C>,
}

impl Agent<Welzl> {
    pub fn new(kind: StrategyKind, cfg: AgentCfg) -> Self {
        Self::with_circle(kind, cfg, Welzl::default())
    }
}

impl<C: EnclosingCircle> Agent<C> {
    pub fn with_circle(kind: StrategyKind, cfg: AgentCfg, circle: C) -> Self {
        let model = PenaltyModel {
            tolerance_pct: cfg.tolerance_pct,
            plate: PlateFit::with_circle(cfg.plate_radius, circle),
        };
        Self { kind, cfg, model }
    }

    #[inline]
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    #[inline]
    pub fn cfg(&self) -> &AgentCfg {
        &self.cfg
    }

    #[inline]
    pub fn model(&self) -> &PenaltyModel<C> {
        &self.model
    }

    /// Decide one turn. `state` is the value returned by the previous turn
    /// (`PlanState::default()` for a new game).
    pub fn turn<P: Shape>(
        &self,
        state: &PlanState,
        percept: &Percept<'_, P>,
    ) -> Result<(Action, PlanState), TurnError> {
        if state.assigned {
            return Err(TurnError::AlreadyAssigned);
        }
        let mut next = state.clone();
        let action = match self.kind {
            StrategyKind::Sneak => self.run(&SneakCuts, percept, &mut next)?,
            StrategyKind::ClimbHills => self.run(&ClimbHills, percept, &mut next)?,
        };
        if let Action::Assign(assignment) = &action {
            let penalty = self
                .model
                .total(percept.pieces, percept.requests, assignment)?;
            tracing::info!(
                strategy = self.kind.name(),
                turn = percept.turn,
                penalty,
                "assign"
            );
            next.assigned = true;
        }
        Ok((action, next))
    }

    fn run<S: Strategy, P: Shape>(
        &self,
        strategy: &S,
        percept: &Percept<'_, P>,
        state: &mut PlanState,
    ) -> Result<Action, TurnError> {
        if percept.turn <= 1 {
            return Ok(Action::Init(strategy.init()));
        }
        strategy.decide(percept, &self.cfg, &self.model, state)
    }
}

#[cfg(test)]
mod tests;
