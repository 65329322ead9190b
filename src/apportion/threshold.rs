//! Removal of parties below the national vote-share threshold.

use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No votes were cast nationally, shares are undefined")]
pub struct NoVotes;

/// National vote total per party.
pub fn party_totals(votes: &[Vec<f64>]) -> Vec<f64> {
    let num_parties = votes.first().map_or(0, Vec::len);
    votes.iter().fold(vec![0.0; num_parties], |mut totals, row| {
        for (total, v) in totals.iter_mut().zip_eq(row) {
            *total += v;
        }
        totals
    })
}

/// Which parties have a national share strictly above `threshold`.
pub fn passing_parties(votes: &[Vec<f64>], threshold: f64) -> Result<Vec<bool>, NoVotes> {
    let totals = party_totals(votes);
    let grand_total: f64 = totals.iter().sum();
    if grand_total <= 0.0 {
        return Err(NoVotes);
    }
    Ok(totals.iter().map(|t| t / grand_total > threshold).collect())
}

/// National totals with failing parties zeroed.
pub fn eliminate_totals(votes: &[Vec<f64>], threshold: f64) -> Result<Vec<f64>, NoVotes> {
    let passing = passing_parties(votes, threshold)?;
    Ok(party_totals(votes)
        .into_iter()
        .zip(passing)
        .map(|(total, pass)| if pass { total } else { 0.0 })
        .collect())
}

/// Vote matrix with failing parties zeroed in every constituency.
pub fn eliminate_constituencies(
    votes: &[Vec<f64>],
    threshold: f64,
) -> Result<Vec<Vec<f64>>, NoVotes> {
    let passing = passing_parties(votes, threshold)?;
    Ok(votes
        .iter()
        .map(|row| {
            row.iter()
                .zip(&passing)
                .map(|(&v, &pass)| if pass { v } else { 0.0 })
                .collect()
        })
        .collect())
}

/// Zeroes the votes of parties whose `targets` are already met by `allocations`,
/// so no later stage can hand them another seat.
pub fn eliminate_satisfied(votes: &mut [Vec<f64>], targets: &[u32], allocations: &[Vec<u32>]) {
    let held = crate::model::column_sums(allocations, targets.len());
    let satisfied: Vec<usize> = targets
        .iter()
        .zip(&held)
        .positions(|(target, held)| held >= target)
        .collect();
    for row in votes.iter_mut() {
        for &party in &satisfied {
            row[party] = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_totals_below_threshold_are_zeroed() {
        let votes = vec![vec![300.0, 100.0, 150.0], vec![200.0, 200.0, 50.0]];
        assert_eq!(eliminate_totals(&votes, 0.25).unwrap(), vec![500.0, 300.0, 0.0]);
    }

    #[test]
    fn share_must_strictly_exceed_threshold() {
        let votes = vec![vec![75.0, 25.0]];
        assert_eq!(eliminate_totals(&votes, 0.25).unwrap(), vec![75.0, 0.0]);
        assert_eq!(eliminate_totals(&votes, 0.0).unwrap(), vec![75.0, 25.0]);
    }

    #[test]
    fn constituency_votes_follow_national_share() {
        // The third party is strong locally but weak nationally.
        let votes = vec![vec![10.0, 10.0, 30.0], vec![400.0, 300.0, 0.0]];
        let eliminated = eliminate_constituencies(&votes, 0.05).unwrap();
        assert_eq!(eliminated, vec![vec![10.0, 10.0, 0.0], vec![400.0, 300.0, 0.0]]);
    }

    #[test]
    fn elimination_is_idempotent() {
        let votes = vec![vec![120.0, 40.0, 9.0, 31.0], vec![80.0, 60.0, 1.0, 19.0]];
        let once = eliminate_constituencies(&votes, 0.1).unwrap();
        let twice = eliminate_constituencies(&once, 0.1).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn no_votes_is_an_error() {
        let votes = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(eliminate_totals(&votes, 0.05), Err(NoVotes));
        assert_eq!(eliminate_constituencies(&votes, 0.05), Err(NoVotes));
    }

    #[test]
    fn satisfied_parties_lose_their_votes() {
        let mut votes = vec![vec![10.0, 20.0], vec![30.0, 40.0]];
        let allocations = vec![vec![1, 1], vec![1, 0]];
        eliminate_satisfied(&mut votes, &[2, 3], &allocations);
        assert_eq!(votes, vec![vec![0.0, 20.0], vec![0.0, 40.0]]);
    }
}
