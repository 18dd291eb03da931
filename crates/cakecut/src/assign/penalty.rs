//! Assignment result type and the penalty model that scores it.
//!
//! Per request `r` served by piece `p`:
//! - unassigned, out of range, without a finite area, or `p` misses the
//!   plate: `MISS_PENALTY` (100);
//! - else `pct = 100·|area(p) − target(r)| / target(r)`, charged only when it
//!   exceeds the tolerance.

use std::fmt;

use super::plate::PlateFit;
use crate::cfg::MISS_PENALTY;
use crate::geom2::{EnclosingCircle, Shape, Welzl};

/// A request whose target area cannot be scored (zero, negative or not finite).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidRequestError {
    pub index: usize,
    pub target: f64,
}

impl fmt::Display for InvalidRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request {} has target area {}; targets must be positive and finite",
            self.index, self.target
        )
    }
}

impl std::error::Error for InvalidRequestError {}

/// Fail on the first request that would divide by zero (or worse).
pub fn validate_requests(requests: &[f64]) -> Result<(), InvalidRequestError> {
    match requests.iter().position(|&t| !(t.is_finite() && t > 0.0)) {
        Some(index) => Err(InvalidRequestError {
            index,
            target: requests[index],
        }),
        None => Ok(()),
    }
}

/// Request-indexed mapping to piece indices.
///
/// Invariant: no piece index appears twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment(Vec<Option<usize>>);

impl Assignment {
    pub fn unassigned(requests: usize) -> Self {
        Self(vec![None; requests])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, request: usize) -> Option<usize> {
        self.0.get(request).copied().flatten()
    }

    #[inline]
    pub fn slots(&self) -> &[Option<usize>] {
        &self.0
    }

    pub(crate) fn set(&mut self, request: usize, piece: Option<usize>) {
        self.0[request] = piece;
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// Engine form: piece index, or `-1` for unassigned.
    pub fn to_wire(&self) -> Vec<i64> {
        self.0
            .iter()
            .map(|slot| slot.map_or(-1, |p| p as i64))
            .collect()
    }

    /// Every slot in range and no piece used twice.
    pub fn is_valid_for(&self, pieces: usize) -> bool {
        let mut used = vec![false; pieces];
        for p in self.0.iter().flatten() {
            if *p >= pieces || used[*p] {
                return false;
            }
            used[*p] = true;
        }
        true
    }
}

impl From<Vec<Option<usize>>> for Assignment {
    fn from(slots: Vec<Option<usize>>) -> Self {
        Self(slots)
    }
}

/// Size-deviation penalty for one served request (target must be valid).
#[inline]
pub fn size_penalty(area: f64, target: f64, tolerance_pct: f64) -> f64 {
    let pct = 100.0 * (area - target).abs() / target;
    if pct > tolerance_pct {
        pct
    } else {
        0.0
    }
}

/// Tolerance plus plate: everything needed to score an assignment.
#[derive(Clone, Copy, Debug)]
pub struct PenaltyModel<C = Welzl> {
    pub tolerance_pct: f64,
    pub plate: PlateFit<C>,
}

impl PenaltyModel<Welzl> {
    pub fn new(tolerance_pct: f64, plate_radius: f64) -> Self {
        Self {
            tolerance_pct,
            plate: PlateFit::new(plate_radius),
        }
    }
}

impl<C: EnclosingCircle> PenaltyModel<C> {
    /// Plate fit per piece. A primitive failure is logged and counts as a miss.
    pub fn fit_mask<P: Shape>(&self, pieces: &[P]) -> Vec<bool> {
        pieces
            .iter()
            .enumerate()
            .map(|(i, p)| match self.plate.fits(p) {
                Ok(ok) => ok,
                Err(err) => {
                    tracing::warn!(piece = i, %err, "plate check failed; scoring as a miss");
                    false
                }
            })
            .collect()
    }

    /// Penalty of serving `target` with a piece of `area` that does (not) fit.
    #[inline]
    pub fn pair(&self, served: Option<(f64, bool)>, target: f64) -> f64 {
        match served {
            Some((area, true)) if area.is_finite() => {
                size_penalty(area, target, self.tolerance_pct)
            }
            _ => MISS_PENALTY,
        }
    }

    /// Sum of per-request penalties. A slot naming a piece index that does
    /// not exist is scored as a miss.
    pub fn total<P: Shape>(
        &self,
        pieces: &[P],
        requests: &[f64],
        assignment: &Assignment,
    ) -> Result<f64, InvalidRequestError> {
        validate_requests(requests)?;
        let mask = self.fit_mask(pieces);
        Ok(self.total_with_mask(pieces, &mask, requests, assignment))
    }

    pub(crate) fn total_with_mask<P: Shape>(
        &self,
        pieces: &[P],
        mask: &[bool],
        requests: &[f64],
        assignment: &Assignment,
    ) -> f64 {
        requests
            .iter()
            .enumerate()
            .map(|(r, &target)| {
                let served = assignment
                    .get(r)
                    .and_then(|p| Some((pieces.get(p)?.area(), *mask.get(p)?)));
                self.pair(served, target)
            })
            .sum()
    }
}
