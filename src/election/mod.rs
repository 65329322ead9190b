//! A single election: votes and rules in, seat allocation out.

pub mod entropy;

pub use entropy::entropy;

use crate::apportion::{apportion1d, eliminate_constituencies, eliminate_satisfied, eliminate_totals, Round};
use crate::methods::{AdjustmentInput, AdjustmentMethod};
use crate::model::{
    add_totals, column_sums, votes_as_f64, AllocationMatrix, ElectionError, Result, Rules,
    VotesMatrix,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of [`Election::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectionResults {
    pub rules: Rules,
    pub seat_allocations: AllocationMatrix,
    /// Constituency seats from the primary apportionment.
    pub constituency_seats: AllocationMatrix,
    /// National seat total each party was entitled to.
    pub party_targets: Vec<u32>,
    /// Adjustment seats each party was entitled to.
    pub adjustment_entitlement: Vec<u32>,
    pub deviation: u32,
    pub entropy: Option<f64>,
}

impl ElectionResults {
    pub fn with_totals(&self) -> AllocationMatrix {
        add_totals(&self.seat_allocations)
    }

    pub fn party_totals(&self) -> Vec<u32> {
        column_sums(&self.seat_allocations, self.rules.num_parties())
    }
}

pub struct Election {
    rules: Rules,
    votes: VotesMatrix,
    original_votes: Vec<Vec<f64>>,

    seat_capacities: Vec<u32>,
    primary: AllocationMatrix,
    last_rounds: Vec<Option<Round>>,
    eliminated_totals: Vec<f64>,
    eliminated_votes: Vec<Vec<f64>>,
    party_targets: Vec<u32>,
    results: AllocationMatrix,
    deviation: u32,
}

impl Election {
    pub fn new(rules: Rules, votes: VotesMatrix) -> Result<Self> {
        validate_votes(&rules, &votes)?;
        let original_votes = votes_as_f64(&votes);
        let seat_capacities = rules.seat_capacities();
        Ok(Self {
            rules,
            votes,
            original_votes,
            seat_capacities,
            primary: Vec::new(),
            last_rounds: Vec::new(),
            eliminated_totals: Vec::new(),
            eliminated_votes: Vec::new(),
            party_targets: Vec::new(),
            results: Vec::new(),
            deviation: 0,
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn votes(&self) -> &VotesMatrix {
        &self.votes
    }

    pub fn primary_allocations(&self) -> &AllocationMatrix {
        &self.primary
    }

    pub fn last_rounds(&self) -> &[Option<Round>] {
        &self.last_rounds
    }

    pub fn eliminated_totals(&self) -> &[f64] {
        &self.eliminated_totals
    }

    pub fn eliminated_votes(&self) -> &[Vec<f64>] {
        &self.eliminated_votes
    }

    pub fn party_targets(&self) -> &[u32] {
        &self.party_targets
    }

    /// Run the election and return its results.
    pub fn run(&mut self) -> Result<ElectionResults> {
        self.run_primary_apportionment();
        self.run_threshold_elimination()?;
        self.run_determine_adjustment_seats();
        self.run_adjustment_apportionment();

        let primary_totals = column_sums(&self.primary, self.rules.num_parties());
        let adjustment_entitlement = self
            .party_targets
            .iter()
            .zip(&primary_totals)
            .map(|(target, primary)| target.saturating_sub(*primary))
            .collect();
        let entropy = if self.rules.show_entropy {
            let e = entropy(
                &self.original_votes,
                &self.results,
                self.rules.adjustment_allocation_divider,
            );
            info!(entropy = e, "election entropy");
            Some(e)
        } else {
            None
        };

        Ok(ElectionResults {
            rules: self.rules.clone(),
            seat_allocations: self.results.clone(),
            constituency_seats: self.primary.clone(),
            party_targets: self.party_targets.clone(),
            adjustment_entitlement,
            deviation: self.deviation,
            entropy,
        })
    }

    fn stage(&self, name: &str) {
        if self.rules.debug {
            info!(election = %self.rules.name, "+ {}", name);
        } else {
            debug!(election = %self.rules.name, "+ {}", name);
        }
    }

    /// Constituency seats, each constituency on its own.
    fn run_primary_apportionment(&mut self) {
        self.stage("Primary apportionment");
        let method = self.rules.primary_divider;
        let (primary, last_rounds): (AllocationMatrix, Vec<Option<Round>>) = self
            .rules
            .constituencies
            .iter()
            .zip(&self.original_votes)
            .map(|(constituency, votes)| {
                let result = apportion1d(votes, constituency.num_const_seats, None, method);
                let last = result.last_round().copied();
                (result.seats, last)
            })
            .unzip();
        self.primary = primary;
        self.last_rounds = last_rounds;
    }

    fn run_threshold_elimination(&mut self) -> Result<()> {
        self.stage("Threshold elimination");
        let threshold = self.rules.adjustment_threshold;
        self.eliminated_totals = eliminate_totals(&self.original_votes, threshold)?;
        self.eliminated_votes = eliminate_constituencies(&self.original_votes, threshold)?;
        Ok(())
    }

    /// National seat totals per party, with the constituency seats as priors.
    fn run_determine_adjustment_seats(&mut self) {
        self.stage("Determine adjustment seats");
        let priors = column_sums(&self.primary, self.rules.num_parties());
        let total_seats: u32 = self.seat_capacities.iter().sum();
        let national = apportion1d(
            &self.eliminated_totals,
            total_seats,
            Some(priors.as_slice()),
            self.rules.adjustment_divider,
        );
        if national.unawarded > 0 {
            warn!(unawarded = national.unawarded, "no party left to take every seat nationally");
        }
        self.party_targets = national.seats;
    }

    fn run_adjustment_apportionment(&mut self) {
        self.stage("Apportion adjustment seats");
        let mut votes = self.eliminated_votes.clone();
        eliminate_satisfied(&mut votes, &self.party_targets, &self.primary);

        let input = AdjustmentInput {
            votes: &votes,
            seat_capacities: &self.seat_capacities,
            party_targets: &self.party_targets,
            prior_allocations: &self.primary,
            divisor: self.rules.adjustment_allocation_divider,
            threshold: self.rules.adjustment_threshold,
            original_votes: &self.original_votes,
            last_rounds: &self.last_rounds,
        };
        let method = self.rules.adjustment_method;
        let adjustment = method.apportion(&input);
        if adjustment.deviation > 0 {
            warn!(
                method = %method,
                deviation = adjustment.deviation,
                "adjustment seats deviate from the national entitlement"
            );
        }
        self.results = adjustment.allocations;
        self.deviation = adjustment.deviation;
    }
}

fn validate_votes(rules: &Rules, votes: &[Vec<u64>]) -> Result<()> {
    if votes.len() != rules.num_constituencies() {
        return Err(ElectionError::ConstituencyCount {
            expected: rules.num_constituencies(),
            found: votes.len(),
        });
    }
    for (constituency, row) in rules.constituencies.iter().zip(votes) {
        if row.len() != rules.num_parties() {
            return Err(ElectionError::PartyCount {
                constituency: constituency.name.clone(),
                expected: rules.num_parties(),
                found: row.len(),
            });
        }
        if constituency.total_seats() > 0 && row.iter().all(|&v| v == 0) {
            return Err(ElectionError::EmptyConstituency(constituency.name.clone()));
        }
    }
    Ok(())
}

/// Run one election per adjustment method over the same rules and votes.
pub fn compare_methods(
    rules: &Rules,
    votes: &VotesMatrix,
) -> Result<Vec<(AdjustmentMethod, ElectionResults)>> {
    AdjustmentMethod::ALL
        .iter()
        .map(|&method| {
            let mut election = Election::new(rules.with_method(method), votes.clone())?;
            Ok((method, election.run()?))
        })
        .collect()
}
