//! Adjustment seat apportionment methods.
//!
//! Every method takes the same snapshot of the election ([`AdjustmentInput`])
//! and fills each constituency up to its seat capacity, trying to make the
//! party columns add up to the national targets.

pub mod alternating_scaling;
pub mod icelandic_law;
pub mod monge;
pub mod relative_inferiority;
pub mod relative_superiority;

use crate::apportion::{apportion1d, next_quotient, DivisorMethod, Round};
use crate::model::{column_sums, AllocationMatrix};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

pub use alternating_scaling::AlternatingScaling;
pub use icelandic_law::IcelandicLaw;
pub use monge::Monge;
pub use relative_inferiority::RelativeInferiority;
pub use relative_superiority::RelativeSuperiority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AdjustmentMethod {
    IcelandicLaw,
    AlternatingScaling,
    RelativeSuperiority,
    RelativeInferiority,
    Monge,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown adjustment method: {0}")]
pub struct UnknownMethod(pub String);

impl AdjustmentMethod {
    pub const ALL: [AdjustmentMethod; 5] = [
        AdjustmentMethod::IcelandicLaw,
        AdjustmentMethod::AlternatingScaling,
        AdjustmentMethod::RelativeSuperiority,
        AdjustmentMethod::RelativeInferiority,
        AdjustmentMethod::Monge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AdjustmentMethod::IcelandicLaw => "icelandic-law",
            AdjustmentMethod::AlternatingScaling => "alternating-scaling",
            AdjustmentMethod::RelativeSuperiority => "relative-superiority",
            AdjustmentMethod::RelativeInferiority => "relative-inferiority",
            AdjustmentMethod::Monge => "monge",
        }
    }

    /// Runs the method and measures how far the party columns land from the targets.
    pub fn apportion(self, input: &AdjustmentInput<'_>) -> Adjustment {
        let allocations = match self {
            AdjustmentMethod::IcelandicLaw => IcelandicLaw.apportion(input),
            AdjustmentMethod::AlternatingScaling => AlternatingScaling::default().apportion(input),
            AdjustmentMethod::RelativeSuperiority => RelativeSuperiority.apportion(input),
            AdjustmentMethod::RelativeInferiority => RelativeInferiority.apportion(input),
            AdjustmentMethod::Monge => Monge.apportion(input),
        };
        let deviation = deviation(&allocations, input.party_targets);
        Adjustment {
            allocations,
            deviation,
        }
    }
}

impl fmt::Display for AdjustmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AdjustmentMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        AdjustmentMethod::ALL
            .iter()
            .copied()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl TryFrom<String> for AdjustmentMethod {
    type Error = UnknownMethod;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AdjustmentMethod> for String {
    fn from(method: AdjustmentMethod) -> Self {
        method.name().to_string()
    }
}

/// Snapshot of the election an adjustment method works from.
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentInput<'a> {
    /// Votes after threshold elimination.
    pub votes: &'a [Vec<f64>],
    /// Total seats (constituency + adjustment) per constituency.
    pub seat_capacities: &'a [u32],
    /// National seat total each party should end up with.
    pub party_targets: &'a [u32],
    /// Constituency seats from the primary apportionment.
    pub prior_allocations: &'a [Vec<u32>],
    pub divisor: DivisorMethod,
    /// Threshold already applied to `votes`. None of the built-in methods read
    /// it; it is passed along for methods that want to tell eliminated parties
    /// apart from parties without votes.
    pub threshold: f64,
    pub original_votes: &'a [Vec<f64>],
    /// Last primary seat awarded in each constituency.
    pub last_rounds: &'a [Option<Round>],
}

impl<'a> AdjustmentInput<'a> {
    pub fn num_constituencies(&self) -> usize {
        self.votes.len()
    }

    pub fn num_parties(&self) -> usize {
        self.party_targets.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub allocations: AllocationMatrix,
    /// Sum over parties of |seats won - target|.
    pub deviation: u32,
}

pub trait Apportioner {
    fn apportion(&self, input: &AdjustmentInput<'_>) -> AllocationMatrix;
}

pub fn deviation(allocations: &[Vec<u32>], targets: &[u32]) -> u32 {
    column_sums(allocations, targets.len())
        .iter()
        .zip(targets)
        .map(|(&won, &target)| if won > target { won - target } else { target - won })
        .sum()
}

/// Allocation in progress, starting from the primary seats.
pub(crate) struct SeatState<'a> {
    pub input: &'a AdjustmentInput<'a>,
    pub allocations: AllocationMatrix,
    party_seats: Vec<u32>,
    constituency_seats: Vec<u32>,
}

impl<'a> SeatState<'a> {
    pub fn new(input: &'a AdjustmentInput<'a>) -> Self {
        let allocations = input.prior_allocations.to_vec();
        let party_seats = column_sums(&allocations, input.num_parties());
        let constituency_seats = allocations.iter().map(|row| row.iter().sum()).collect();
        Self {
            input,
            allocations,
            party_seats,
            constituency_seats,
        }
    }

    pub fn is_open(&self, constituency: usize) -> bool {
        self.constituency_seats[constituency] < self.input.seat_capacities[constituency]
    }

    pub fn wants_seats(&self, party: usize) -> bool {
        self.party_seats[party] < self.input.party_targets[party]
    }

    pub fn quotient(&self, constituency: usize, party: usize) -> f64 {
        next_quotient(
            self.input.votes[constituency][party],
            self.allocations[constituency][party],
            self.input.divisor,
        )
    }

    /// Open constituency, party short of its target, positive quotient.
    pub fn is_eligible(&self, constituency: usize, party: usize) -> bool {
        self.is_open(constituency)
            && self.wants_seats(party)
            && self.input.votes[constituency][party] > 0.0
    }

    pub fn eligible_pairs(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.input.num_constituencies(), 0..self.input.num_parties())
            .filter(|&(c, p)| self.is_eligible(c, p))
            .collect()
    }

    pub fn remaining(&self) -> u32 {
        let capacity: u32 = self.input.seat_capacities.iter().sum();
        capacity.saturating_sub(self.constituency_seats.iter().sum())
    }

    pub fn award(&mut self, constituency: usize, party: usize) {
        self.allocations[constituency][party] += 1;
        self.party_seats[party] += 1;
        self.constituency_seats[constituency] += 1;
    }

    pub fn finish(self) -> AllocationMatrix {
        complete_rows(self.input, self.allocations)
    }
}

/// Picks the next (constituency, party) pair to receive a seat. Methods that
/// implement it hand out one seat at a time and re-evaluate after each award.
pub(crate) trait GreedyRule {
    fn pick(&self, state: &SeatState<'_>) -> Option<(usize, usize)>;
}

pub(crate) fn run_greedy<R: GreedyRule>(rule: &R, input: &AdjustmentInput<'_>) -> AllocationMatrix {
    let mut state = SeatState::new(input);
    while state.remaining() > 0 {
        match rule.pick(&state) {
            Some((constituency, party)) => state.award(constituency, party),
            None => break,
        }
    }
    state.finish()
}

/// First item with the largest score.
pub(crate) fn first_max<T>(scored: impl IntoIterator<Item = (T, f64)>) -> Option<(T, f64)> {
    scored.into_iter().fold(None, |best, (item, score)| match best {
        Some((_, b)) if b >= score => best,
        _ => Some((item, score)),
    })
}

/// Fills constituencies still below capacity once a method has run out of
/// eligible pairs: first by the eliminated votes regardless of party targets,
/// then by the original votes.
pub(crate) fn complete_rows(
    input: &AdjustmentInput<'_>,
    mut allocations: AllocationMatrix,
) -> AllocationMatrix {
    for (c, row) in allocations.iter_mut().enumerate() {
        let capacity = input.seat_capacities[c];
        if row.iter().sum::<u32>() >= capacity {
            continue;
        }
        tracing::debug!(constituency = c, "completing constituency outside party targets");
        for votes in [&input.votes[c], &input.original_votes[c]] {
            *row = apportion1d(votes, capacity, Some(row.as_slice()), input.divisor).seats;
        }
        let filled: u32 = row.iter().sum();
        if filled < capacity {
            tracing::warn!(constituency = c, filled, capacity, "constituency left short of seats");
        }
    }
    allocations
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn method_names_round_trip() {
        for method in AdjustmentMethod::ALL {
            assert_eq!(method.name().parse::<AdjustmentMethod>(), Ok(method));
        }
        assert_eq!(
            "Relative_Superiority".parse::<AdjustmentMethod>(),
            Ok(AdjustmentMethod::RelativeSuperiority)
        );
        assert_eq!(
            "norwegian".parse::<AdjustmentMethod>(),
            Err(UnknownMethod("norwegian".to_string()))
        );
    }

    #[test]
    fn deviation_counts_both_directions() {
        let allocations = vec![vec![2, 1, 0], vec![1, 1, 1]];
        assert_eq!(deviation(&allocations, &[3, 2, 1]), 0);
        assert_eq!(deviation(&allocations, &[2, 2, 2]), 2);
    }

    #[test]
    fn first_max_prefers_earliest() {
        let scored = vec![("a", 1.0), ("b", 3.0), ("c", 3.0)];
        assert_eq!(first_max(scored), Some(("b", 3.0)));
        assert_eq!(first_max(Vec::<((), f64)>::new()), None);
    }

    #[test]
    fn every_method_fills_every_row() {
        let snapshot = two_by_three();
        for method in AdjustmentMethod::ALL {
            let adjustment = method.apportion(&snapshot.input());
            assert_rows_full(&snapshot, &adjustment.allocations);
            assert_eq!(adjustment.deviation, 0, "{}", method);
        }
    }

    #[test]
    fn completion_uses_original_votes_when_stuck() {
        let mut snapshot = two_by_three();
        // Nobody left with eliminated votes in South.
        snapshot.votes[1] = vec![0.0, 0.0, 0.0];
        let allocations = complete_rows(&snapshot.input(), snapshot.priors.clone());
        assert_rows_full(&snapshot, &allocations);
        assert_eq!(allocations[0], vec![4, 2, 0]);
        assert_eq!(allocations[1], vec![2, 2, 1]);
    }
}
