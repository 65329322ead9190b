//! In every open constituency the strongest eligible party is measured against
//! the runner-up; the seat goes where that lead is largest.

use super::{first_max, run_greedy, AdjustmentInput, Apportioner, GreedyRule, SeatState};
use crate::model::AllocationMatrix;

#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeSuperiority;

impl RelativeSuperiority {
    /// Best eligible party in `constituency` and its lead over the runner-up.
    /// An unopposed party leads by infinity.
    fn superiority(state: &SeatState<'_>, constituency: usize) -> Option<(usize, f64)> {
        let mut quotients: Vec<(usize, f64)> = (0..state.input.num_parties())
            .filter(|&p| state.is_eligible(constituency, p))
            .map(|p| (p, state.quotient(constituency, p)))
            .collect();
        // Stable, so equal quotients keep party order.
        quotients.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (party, best) = *quotients.first()?;
        let lead = match quotients.get(1) {
            Some(&(_, runner_up)) if runner_up > 0.0 => best / runner_up,
            _ => f64::INFINITY,
        };
        Some((party, lead))
    }
}

impl GreedyRule for RelativeSuperiority {
    fn pick(&self, state: &SeatState<'_>) -> Option<(usize, usize)> {
        let scored = (0..state.input.num_constituencies()).filter_map(|c| {
            Self::superiority(state, c).map(|(party, lead)| ((c, party), lead))
        });
        first_max(scored).map(|(pair, _)| pair)
    }
}

impl Apportioner for RelativeSuperiority {
    fn apportion(&self, input: &AdjustmentInput<'_>) -> AllocationMatrix {
        run_greedy(self, input)
    }
}
