//! Biproportional apportionment by alternating scaling.
//!
//! Each constituency row and each party column carries a multiplier the votes
//! are divided by. A sweep apportions every row to its capacity and rescales
//! it, then apportions every column to its party target and rescales it. The
//! sweeps stop once apportioning the rows alone already gives every party its
//! target, or when the multipliers no longer move.

use super::{complete_rows, AdjustmentInput, Apportioner};
use crate::apportion::{apportion1d, next_quotient, Apportionment, DivisorMethod};
use crate::model::{column_sums, AllocationMatrix};
use tracing::debug;

const DEFAULT_MAX_SWEEPS: usize = 200;
const SETTLED: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
pub struct AlternatingScaling {
    pub max_sweeps: usize,
}

impl Default for AlternatingScaling {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

/// Factor that moves the seat boundary of an apportionment to 1: the midpoint
/// between the last winning quotient and the best losing one.
fn boundary(votes: &[f64], result: &Apportionment, method: DivisorMethod) -> f64 {
    let last_win = match result.last_round() {
        Some(round) => round.quotient,
        None => return 1.0,
    };
    let first_loss = votes
        .iter()
        .zip(&result.seats)
        .map(|(&v, &held)| next_quotient(v, held, method))
        .fold(0.0, f64::max);
    if first_loss > 0.0 {
        (last_win + first_loss) / 2.0
    } else {
        last_win
    }
}

struct Scaling<'a> {
    input: &'a AdjustmentInput<'a>,
    row_multipliers: Vec<f64>,
    column_multipliers: Vec<f64>,
}

impl<'a> Scaling<'a> {
    fn new(input: &'a AdjustmentInput<'a>) -> Self {
        Self {
            input,
            row_multipliers: vec![1.0; input.num_constituencies()],
            column_multipliers: vec![1.0; input.num_parties()],
        }
    }

    fn scaled(&self, c: usize, p: usize) -> f64 {
        self.input.votes[c][p] / (self.row_multipliers[c] * self.column_multipliers[p])
    }

    fn apportion_row(&self, c: usize) -> (Vec<f64>, Apportionment) {
        let row: Vec<f64> = (0..self.input.num_parties()).map(|p| self.scaled(c, p)).collect();
        let result = apportion1d(
            &row,
            self.input.seat_capacities[c],
            Some(self.input.prior_allocations[c].as_slice()),
            self.input.divisor,
        );
        (row, result)
    }

    fn apportion_column(&self, p: usize) -> (Vec<f64>, Apportionment) {
        let column: Vec<f64> = (0..self.input.num_constituencies())
            .map(|c| self.scaled(c, p))
            .collect();
        let priors: Vec<u32> = self
            .input
            .prior_allocations
            .iter()
            .map(|row| row[p])
            .collect();
        let result = apportion1d(
            &column,
            self.input.party_targets[p],
            Some(priors.as_slice()),
            self.input.divisor,
        );
        (column, result)
    }

    fn rows(&self) -> AllocationMatrix {
        (0..self.input.num_constituencies())
            .map(|c| self.apportion_row(c).1.seats)
            .collect()
    }

    /// One row pass and one column pass; returns the largest relative change.
    fn sweep(&mut self) -> f64 {
        let mut largest_change: f64 = 0.0;
        for c in 0..self.input.num_constituencies() {
            let (row, result) = self.apportion_row(c);
            let factor = boundary(&row, &result, self.input.divisor);
            self.row_multipliers[c] *= factor;
            largest_change = largest_change.max((factor - 1.0).abs());
        }
        for p in 0..self.input.num_parties() {
            let (column, result) = self.apportion_column(p);
            let factor = boundary(&column, &result, self.input.divisor);
            self.column_multipliers[p] *= factor;
            largest_change = largest_change.max((factor - 1.0).abs());
        }
        largest_change
    }
}

impl Apportioner for AlternatingScaling {
    fn apportion(&self, input: &AdjustmentInput<'_>) -> AllocationMatrix {
        let mut scaling = Scaling::new(input);
        for sweep in 1..=self.max_sweeps {
            let change = scaling.sweep();
            let allocations = scaling.rows();
            if column_sums(&allocations, input.num_parties()) == input.party_targets {
                debug!(sweep, "alternating scaling converged");
                return complete_rows(input, allocations);
            }
            if change < SETTLED {
                debug!(sweep, "alternating scaling settled off target");
                break;
            }
        }
        complete_rows(input, scaling.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn boundary_sits_between_last_win_and_first_loss() {
        let votes = [5000.0, 3000.0, 1100.0];
        let result = apportion1d(&votes, 6, Some(&[3, 2, 0][..]), DivisorMethod::DHondt);
        assert_eq!(result.seats, vec![4, 2, 0]);
        // Won at 1250, C next in line at 1100.
        assert_eq!(boundary(&votes, &result, DivisorMethod::DHondt), 1175.0);
    }

    #[test]
    fn boundary_of_empty_apportionment_is_neutral() {
        let votes = [10.0, 20.0];
        let result = apportion1d(&votes, 2, Some(&[1, 1][..]), DivisorMethod::DHondt);
        assert_eq!(boundary(&votes, &result, DivisorMethod::DHondt), 1.0);
    }

    #[test]
    fn converges_on_party_targets() {
        let snapshot = two_by_three();
        let allocations = AlternatingScaling::default().apportion(&snapshot.input());
        assert_eq!(allocations, vec![vec![3, 2, 1], vec![2, 2, 1]]);
    }

    #[test]
    fn zero_sweeps_still_fill_rows() {
        let snapshot = two_by_three();
        let allocations = AlternatingScaling { max_sweeps: 0 }.apportion(&snapshot.input());
        assert_rows_full(&snapshot, &allocations);
    }
}
