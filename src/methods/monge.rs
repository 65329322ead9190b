//! Seat-by-seat allocation driven by the Monge cross ratio.
//!
//! For two candidate awards (c, p) and (c', p') the cross ratio
//! `q(c,p) q(c',p') / (q(c,p') q(c',p))` tells whether giving the seats as
//! (c, p), (c', p') beats the swapped pairing (c, p'), (c', p). A candidate is
//! scored by its worst cross ratio against every other candidate, and the best
//! scored candidate gets the seat.
//!
//! This is a greedy heuristic. It awards one seat at a time and does not solve
//! the matching as a whole, so the final matrix is not guaranteed to be free of
//! improving swaps.

use super::{run_greedy, AdjustmentInput, Apportioner, GreedyRule, SeatState};
use crate::model::AllocationMatrix;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default)]
pub struct Monge;

impl Monge {
    fn worst_cross_ratio(
        state: &SeatState<'_>,
        candidates: &[(usize, usize)],
        (c, p): (usize, usize),
    ) -> f64 {
        candidates
            .iter()
            .filter(|&&(c2, p2)| c2 != c && p2 != p)
            .filter_map(|&(c2, p2)| {
                let swapped = state.quotient(c, p2) * state.quotient(c2, p);
                if swapped > 0.0 {
                    Some(state.quotient(c, p) * state.quotient(c2, p2) / swapped)
                } else {
                    None
                }
            })
            .fold(f64::INFINITY, f64::min)
    }
}

impl GreedyRule for Monge {
    fn pick(&self, state: &SeatState<'_>) -> Option<(usize, usize)> {
        let candidates = state.eligible_pairs();
        let mut best: Option<((usize, usize), f64, f64)> = None;
        for &pair in &candidates {
            let score = Self::worst_cross_ratio(state, &candidates, pair);
            let quotient = state.quotient(pair.0, pair.1);
            let better = match best {
                None => true,
                Some((_, best_score, best_quotient)) => {
                    match score.partial_cmp(&best_score) {
                        Some(Ordering::Greater) => true,
                        Some(Ordering::Equal) => quotient > best_quotient,
                        _ => false,
                    }
                }
            };
            if better {
                best = Some((pair, score, quotient));
            }
        }
        best.map(|(pair, _, _)| pair)
    }
}

impl Apportioner for Monge {
    fn apportion(&self, input: &AdjustmentInput<'_>) -> AllocationMatrix {
        run_greedy(self, input)
    }
}
