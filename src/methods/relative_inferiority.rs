//! In every open constituency the strongest eligible party is measured against
//! the quotient that won the constituency's last seat in the primary
//! apportionment. Seats go first where the party falls least short of it.

use super::{first_max, run_greedy, AdjustmentInput, Apportioner, GreedyRule, SeatState};
use crate::model::AllocationMatrix;

#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeInferiority;

impl RelativeInferiority {
    /// Quotient an adjustment seat in `constituency` is compared against.
    fn reference(state: &SeatState<'_>, constituency: usize) -> f64 {
        match state.input.last_rounds.get(constituency).copied().flatten() {
            Some(round) => round.quotient,
            // No constituency seats: the best quotient of any party.
            None => (0..state.input.num_parties())
                .map(|p| state.quotient(constituency, p))
                .fold(0.0, f64::max),
        }
    }

    /// Best eligible party and how close it comes to the reference, in (0, 1]
    /// for regular input.
    fn closeness(state: &SeatState<'_>, constituency: usize) -> Option<(usize, f64)> {
        let reference = Self::reference(state, constituency);
        if reference <= 0.0 {
            return None;
        }
        let scored = (0..state.input.num_parties())
            .filter(|&p| state.is_eligible(constituency, p))
            .map(|p| (p, state.quotient(constituency, p)));
        first_max(scored).map(|(party, quotient)| (party, quotient / reference))
    }
}

impl GreedyRule for RelativeInferiority {
    fn pick(&self, state: &SeatState<'_>) -> Option<(usize, usize)> {
        let scored = (0..state.input.num_constituencies()).filter_map(|c| {
            Self::closeness(state, c).map(|(party, closeness)| ((c, party), closeness))
        });
        first_max(scored).map(|(pair, _)| pair)
    }
}

impl Apportioner for RelativeInferiority {
    fn apportion(&self, input: &AdjustmentInput<'_>) -> AllocationMatrix {
        run_greedy(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn compares_against_last_primary_seat() {
        let snapshot = two_by_three();
        let input = snapshot.input();
        let state = SeatState::new(&input);
        let (party, closeness) = RelativeInferiority::closeness(&state, 0).unwrap();
        assert_eq!(party, 0);
        assert!((closeness - 1250.0 / 1500.0).abs() < 1e-12);
        // South: 1000 / 1100 is closer.
        assert_eq!(RelativeInferiority.pick(&state), Some((1, 0)));
    }

    #[test]
    fn constituency_without_primary_seats_uses_best_quotient() {
        let mut snapshot = two_by_three();
        snapshot.last[1] = None;
        let input = snapshot.input();
        let state = SeatState::new(&input);
        // A's own next quotient is the best in the south.
        let reference = RelativeInferiority::reference(&state, 1);
        assert!((reference - 1000.0).abs() < 1e-12);
        assert_eq!(RelativeInferiority::closeness(&state, 1), Some((0, 1.0)));
    }

    #[test]
    fn fills_both_constituencies() {
        let snapshot = two_by_three();
        let allocations = RelativeInferiority.apportion(&snapshot.input());
        assert_eq!(allocations, vec![vec![3, 2, 1], vec![2, 2, 1]]);
    }
}
