//! Adjustment seats as allotted under the Icelandic parliamentary election act.
//!
//! Each remaining seat goes to the party and constituency where the party's
//! share of the constituency's valid votes, divided by the next divisor, is
//! highest. Only constituencies with free seats and parties short of their
//! national total take part.

use super::{first_max, run_greedy, AdjustmentInput, Apportioner, GreedyRule, SeatState};
use crate::model::AllocationMatrix;

#[derive(Debug, Clone, Copy, Default)]
pub struct IcelandicLaw;

impl IcelandicLaw {
    fn share_quotient(state: &SeatState<'_>, constituency: usize, party: usize) -> f64 {
        let valid_votes: f64 = state.input.original_votes[constituency].iter().sum();
        if valid_votes <= 0.0 {
            return 0.0;
        }
        state.quotient(constituency, party) / valid_votes
    }
}

impl GreedyRule for IcelandicLaw {
    fn pick(&self, state: &SeatState<'_>) -> Option<(usize, usize)> {
        let scored = state
            .eligible_pairs()
            .into_iter()
            .map(|(c, p)| ((c, p), Self::share_quotient(state, c, p)));
        first_max(scored).map(|(pair, _)| pair)
    }
}

impl Apportioner for IcelandicLaw {
    fn apportion(&self, input: &AdjustmentInput<'_>) -> AllocationMatrix {
        run_greedy(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn strongest_relative_share_wins_first() {
        let snapshot = two_by_three();
        let input = snapshot.input();
        let state = SeatState::new(&input);
        // South: 1000 / 5700 beats north: 1250 / 9100.
        assert_eq!(IcelandicLaw.pick(&state), Some((1, 0)));

        let allocations = IcelandicLaw.apportion(&input);
        assert_eq!(allocations, vec![vec![3, 2, 1], vec![2, 2, 1]]);
    }

    #[test]
    fn shares_use_unfiltered_constituency_totals() {
        let mut snapshot = two_by_three();
        // B is eliminated but its votes still count towards the valid total.
        snapshot.votes[1][1] = 0.0;
        let input = snapshot.input();
        let state = SeatState::new(&input);
        let share = IcelandicLaw::share_quotient(&state, 1, 0);
        assert!((share - 2000.0 / 2.0 / 5700.0).abs() < 1e-12);
    }

    #[test]
    fn satisfied_parties_are_skipped() {
        let mut snapshot = two_by_three();
        snapshot.targets = vec![4, 4, 3];
        let allocations = IcelandicLaw.apportion(&snapshot.input());
        assert_rows_full(&snapshot, &allocations);
        assert_eq!(allocations, vec![vec![3, 2, 1], vec![1, 2, 2]]);
    }
}
