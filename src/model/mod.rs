pub mod rules;

pub use rules::{Constituency, Rules, RulesConfig};

use crate::apportion::{NoVotes, UnknownDivider};
use crate::methods::UnknownMethod;

/// Votes per constituency (rows) per party (columns).
pub type VotesMatrix = Vec<Vec<u64>>;

/// Seats per constituency (rows) per party (columns).
pub type AllocationMatrix = Vec<Vec<u32>>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElectionError {
    #[error("Expected votes for {expected} constituencies, got {found}")]
    ConstituencyCount { expected: usize, found: usize },
    #[error("Constituency {constituency} has votes for {found} parties, expected {expected}")]
    PartyCount {
        constituency: String,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    UnknownDivider(#[from] UnknownDivider),
    #[error(transparent)]
    UnknownMethod(#[from] UnknownMethod),
    #[error(transparent)]
    NoVotes(#[from] NoVotes),
    /// A constituency with seats to fill but no votes cast. Rejected up front:
    /// no apportionment could ever fill its row.
    #[error("Constituency {0} has seats but no votes")]
    EmptyConstituency(String),
    #[error("Adjustment threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
    #[error("Rules define no {0}")]
    Missing(&'static str),
}

pub type Result<T> = std::result::Result<T, ElectionError>;

/// Seats (or votes) per column summed over rows.
pub fn column_sums<T>(matrix: &[Vec<T>], num_columns: usize) -> Vec<T>
where
    T: Copy + Default + std::ops::AddAssign,
{
    let mut sums = vec![T::default(); num_columns];
    for row in matrix {
        for (sum, &cell) in sums.iter_mut().zip(row) {
            *sum += cell;
        }
    }
    sums
}

pub fn votes_as_f64(votes: &[Vec<u64>]) -> Vec<Vec<f64>> {
    votes
        .iter()
        .map(|row| row.iter().map(|&v| v as f64).collect())
        .collect()
}

/// Appends a totals column to every row and a totals row at the bottom.
pub fn add_totals(matrix: &[Vec<u32>]) -> AllocationMatrix {
    let num_columns = matrix.first().map_or(0, Vec::len);
    let mut with_totals: AllocationMatrix = matrix
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.push(row.iter().sum());
            row
        })
        .collect();
    let totals = column_sums(&with_totals, num_columns + 1);
    with_totals.push(totals);
    with_totals
}
