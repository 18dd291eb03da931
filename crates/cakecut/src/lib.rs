//! Cut planning and piece assignment for the cake-cutting game.
//!
//! The crate decides one engine turn at a time: where the knife goes next
//! (an even grid reached through boundary-hugging "sneak" paths), and, once
//! the cake is cut, which piece serves which size request.
//!
//! Layout
//! - `geom2`: tray, pieces, edge helpers, minimal enclosing circle.
//! - `plan`: sneak paths and the even-partition scheduler.
//! - `assign`: penalty model, plate fit, matching strategies.
//! - `agent`: the turn handler tying it together.

pub mod agent;
pub mod assign;
pub mod cfg;
pub mod geom2;
pub mod plan;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::agent::{Action, Agent, AgentCfg, Percept, StrategyKind, TurnError};
    pub use crate::assign::{
        AssignMethod, Assignment, InvalidRequestError, PenaltyModel, PlateFit,
    };
    pub use crate::geom2::{EnclosingCircle, GeometryError, Piece, Shape, Tray, Welzl};
    pub use crate::plan::{even_cut_sequence, Phase, PlanState};
    pub use nalgebra::Vector2 as Vec2;
}
