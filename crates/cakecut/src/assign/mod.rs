//! Piece-to-request assignment.
//!
//! Purpose
//! - Score assignments under the game's penalty rules (tolerance, plate fit).
//! - Offer interchangeable matchers behind the `Assigner` trait.
//!
//! Note: `SortedPairing` is not the minimum-cost bipartite
//! matching. It stays the default; `SwapDescent` is an opt-in improvement.

mod penalty;
mod plate;
mod strategies;

pub use penalty::{size_penalty, validate_requests, Assignment, InvalidRequestError, PenaltyModel};
pub use plate::PlateFit;
pub use strategies::{AssignMethod, Assigner, NearestArea, SortedPairing, SwapDescent};
