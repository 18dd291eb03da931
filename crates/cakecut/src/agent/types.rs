//! Turn inputs and outputs, agent configuration, and turn errors.

use std::fmt;

use nalgebra::Vector2;

use crate::assign::{AssignMethod, Assignment, InvalidRequestError};
use crate::cfg::{NIBBLE_STEP, PLATE_RADIUS};
use crate::geom2::Tray;
use crate::plan::ScheduleError;

/// Agent configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentCfg {
    /// Size deviation (percent) that is not penalized.
    pub tolerance_pct: f64,
    pub plate_radius: f64,
    /// y-offset of the fallback nibble cut.
    pub nibble_step: f64,
    /// Matcher used by the `Sneak` strategy.
    pub assign_method: AssignMethod,
}

impl Default for AgentCfg {
    fn default() -> Self {
        Self {
            tolerance_pct: 0.0,
            plate_radius: PLATE_RADIUS,
            nibble_step: NIBBLE_STEP,
            assign_method: AssignMethod::default(),
        }
    }
}

/// What the engine reports at the start of a turn.
#[derive(Clone, Copy, Debug)]
pub struct Percept<'a, P> {
    /// 1-based; turn 1 places the knife.
    pub turn: u32,
    pub knife: Vector2<f64>,
    pub tray: Tray,
    pub pieces: &'a [P],
    pub requests: &'a [f64],
}

/// One decision returned to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Init(Vector2<f64>),
    Cut(Vector2<f64>),
    Assign(Assignment),
}

impl Action {
    /// Engine action code.
    pub fn code(&self) -> &'static str {
        match self {
            Action::Init(_) => "INIT",
            Action::Cut(_) => "CUT",
            Action::Assign(_) => "ASSIGN",
        }
    }
}

/// Why a turn could not produce an action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurnError {
    /// The final assignment was already emitted; the game is over for us.
    AlreadyAssigned,
    InvalidRequest(InvalidRequestError),
    Schedule(ScheduleError),
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::AlreadyAssigned => write!(f, "assignment already emitted"),
            TurnError::InvalidRequest(e) => write!(f, "{e}"),
            TurnError::Schedule(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnError::AlreadyAssigned => None,
            TurnError::InvalidRequest(e) => Some(e),
            TurnError::Schedule(e) => Some(e),
        }
    }
}

impl From<InvalidRequestError> for TurnError {
    fn from(e: InvalidRequestError) -> Self {
        TurnError::InvalidRequest(e)
    }
}

impl From<ScheduleError> for TurnError {
    fn from(e: ScheduleError) -> Self {
        TurnError::Schedule(e)
    }
}
