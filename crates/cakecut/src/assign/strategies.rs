//! Matching strategies from pieces to requests.
//!
//! - `SortedPairing`: both sides sorted by descending area, paired by rank.
//!   Fast and generally suboptimal; kept as the default.
//! - `NearestArea`: requests in index order each take the closest remaining
//!   piece; pieces without a finite area are skipped.
//! - `SwapDescent`: hill-climbs the total penalty from the sorted pairing with
//!   pairwise swaps and swaps against unused pieces.

use super::penalty::{validate_requests, Assignment, InvalidRequestError, PenaltyModel};
use crate::geom2::{EnclosingCircle, Shape};

/// A way of matching pieces to requests.
pub trait Assigner {
    fn assign<P: Shape, C: EnclosingCircle>(
        &self,
        pieces: &[P],
        requests: &[f64],
        model: &PenaltyModel<C>,
    ) -> Result<Assignment, InvalidRequestError>;
}

/// Tag for picking an `Assigner` from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AssignMethod {
    #[default]
    SortedPairing,
    NearestArea,
    SwapDescent,
}

impl AssignMethod {
    pub fn name(self) -> &'static str {
        match self {
            AssignMethod::SortedPairing => "sorted",
            AssignMethod::NearestArea => "nearest",
            AssignMethod::SwapDescent => "swap",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sorted" => Some(AssignMethod::SortedPairing),
            "nearest" => Some(AssignMethod::NearestArea),
            "swap" => Some(AssignMethod::SwapDescent),
            _ => None,
        }
    }

    pub fn assign<P: Shape, C: EnclosingCircle>(
        self,
        pieces: &[P],
        requests: &[f64],
        model: &PenaltyModel<C>,
    ) -> Result<Assignment, InvalidRequestError> {
        match self {
            AssignMethod::SortedPairing => SortedPairing.assign(pieces, requests, model),
            AssignMethod::NearestArea => NearestArea.assign(pieces, requests, model),
            AssignMethod::SwapDescent => SwapDescent::default().assign(pieces, requests, model),
        }
    }
}

/// Indices ordered by descending key; ties keep index order (stable sort).
/// Non-finite keys rank last.
fn descending_order(keys: impl Iterator<Item = f64>) -> Vec<usize> {
    let keys: Vec<f64> = keys
        .map(|k| if k.is_finite() { k } else { f64::NEG_INFINITY })
        .collect();
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));
    order
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SortedPairing;

impl Assigner for SortedPairing {
    fn assign<P: Shape, C: EnclosingCircle>(
        &self,
        pieces: &[P],
        requests: &[f64],
        _model: &PenaltyModel<C>,
    ) -> Result<Assignment, InvalidRequestError> {
        validate_requests(requests)?;
        let piece_order = descending_order(pieces.iter().map(|p| p.area()));
        let request_order = descending_order(requests.iter().copied());
        let mut out = Assignment::unassigned(requests.len());
        for (&r, &p) in request_order.iter().zip(&piece_order) {
            out.set(r, Some(p));
        }
        Ok(out)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NearestArea;

impl Assigner for NearestArea {
    fn assign<P: Shape, C: EnclosingCircle>(
        &self,
        pieces: &[P],
        requests: &[f64],
        _model: &PenaltyModel<C>,
    ) -> Result<Assignment, InvalidRequestError> {
        validate_requests(requests)?;
        let mut free = vec![true; pieces.len()];
        let mut out = Assignment::unassigned(requests.len());
        for (r, &target) in requests.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for (p, piece) in pieces.iter().enumerate() {
                if !free[p] || !piece.area().is_finite() {
                    continue;
                }
                let diff = (piece.area() - target).abs();
                if best.as_ref().is_none_or(|(_, d)| diff < *d) {
                    best = Some((p, diff));
                }
            }
            if let Some((p, _)) = best {
                free[p] = false;
                out.set(r, Some(p));
            }
        }
        Ok(out)
    }
}

/// Local search over single swaps. `max_rounds` bounds the number of full
/// improvement sweeps.
#[derive(Clone, Copy, Debug)]
pub struct SwapDescent {
    pub max_rounds: usize,
}

impl Default for SwapDescent {
    fn default() -> Self {
        Self { max_rounds: 64 }
    }
}

impl Assigner for SwapDescent {
    fn assign<P: Shape, C: EnclosingCircle>(
        &self,
        pieces: &[P],
        requests: &[f64],
        model: &PenaltyModel<C>,
    ) -> Result<Assignment, InvalidRequestError> {
        let mut cur = SortedPairing.assign(pieces, requests, model)?;
        let mask = model.fit_mask(pieces);
        let cost = |slot: Option<usize>, r: usize| {
            model.pair(slot.map(|p| (pieces[p].area(), mask[p])), requests[r])
        };
        let mut used = vec![false; pieces.len()];
        for p in cur.slots().iter().flatten() {
            used[*p] = true;
        }

        for round in 0..self.max_rounds {
            let mut improved = false;
            for a in 0..requests.len() {
                for b in a + 1..requests.len() {
                    let (sa, sb) = (cur.get(a), cur.get(b));
                    let delta = cost(sb, a) + cost(sa, b) - cost(sa, a) - cost(sb, b);
                    if delta < -1e-9 {
                        cur.swap(a, b);
                        improved = true;
                    }
                }
                for u in 0..pieces.len() {
                    if used[u] {
                        continue;
                    }
                    let sa = cur.get(a);
                    if cost(Some(u), a) < cost(sa, a) - 1e-9 {
                        if let Some(old) = sa {
                            used[old] = false;
                        }
                        used[u] = true;
                        cur.set(a, Some(u));
                        improved = true;
                    }
                }
            }
            if !improved {
                tracing::debug!(rounds = round + 1, "swap descent converged");
                break;
            }
        }
        Ok(cur)
    }
}
