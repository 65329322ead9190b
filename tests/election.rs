use seat_apportion::apportion::{apportion1d, eliminate_totals, DivisorMethod};
use seat_apportion::formats::{read_rules, read_votes};
use seat_apportion::model::{Constituency, ElectionError, Rules, RulesConfig};
use seat_apportion::{compare_methods, AdjustmentMethod, Election};
use std::convert::TryFrom;
use std::path::Path;

fn sample() -> (Rules, Vec<Vec<u64>>) {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample");
    let rules = read_rules(&dir.join("rules.json")).unwrap();
    let votes = read_votes(&dir.join("votes.json"), &rules).unwrap();
    (rules, votes)
}

#[test]
fn single_constituency_dhondt() {
    let result = apportion1d(&[100.0, 80.0, 20.0], 4, None, DivisorMethod::DHondt);
    assert_eq!(result.seats, vec![2, 2, 0]);
}

#[test]
fn national_threshold_example() {
    let votes = vec![vec![500.0, 300.0, 200.0]];
    assert_eq!(eliminate_totals(&votes, 0.25).unwrap(), vec![500.0, 300.0, 0.0]);
}

#[test]
fn all_zero_votes_award_nothing() {
    let result = apportion1d(&[0.0], 5, None, DivisorMethod::DHondt);
    assert_eq!(result.seats, vec![0]);
}

#[test]
fn sample_election_fills_every_constituency() {
    let (rules, votes) = sample();
    let capacities = rules.seat_capacities();

    for (method, results) in compare_methods(&rules, &votes).unwrap() {
        for (row, capacity) in results.seat_allocations.iter().zip(&capacities) {
            assert_eq!(row.iter().sum::<u32>(), *capacity, "{}", method);
        }
        let awarded: u32 = results.party_totals().iter().sum();
        assert_eq!(awarded, 63, "{}", method);
        assert_eq!(results.adjustment_entitlement.iter().sum::<u32>(), 9);
        for (row, primary) in results.seat_allocations.iter().zip(&results.constituency_seats) {
            assert!(row.iter().zip(primary).all(|(won, held)| won >= held), "{}", method);
        }
    }
}

#[test]
fn sample_election_eliminates_small_party() {
    let (rules, votes) = sample();
    let mut election = Election::new(rules, votes).unwrap();
    let results = election.run().unwrap();

    // C polls under 5% nationally and wins no constituency seat.
    assert_eq!(election.eliminated_totals()[1], 0.0);
    assert_eq!(results.party_totals()[1], 0);
    assert_eq!(results.deviation, 0);
}

#[test]
fn runs_are_repeatable() {
    let (rules, votes) = sample();
    for method in AdjustmentMethod::ALL.iter().copied() {
        let rules = rules.with_method(method);
        let first = Election::new(rules.clone(), votes.clone()).unwrap().run().unwrap();
        let second = Election::new(rules, votes.clone()).unwrap().run().unwrap();
        assert_eq!(first, second, "{}", method);
    }
}

#[test]
fn rejects_mismatched_votes() {
    let config = RulesConfig {
        parties: vec!["A".to_string(), "B".to_string()],
        constituencies: vec![Constituency {
            name: "Only".to_string(),
            num_const_seats: 3,
            num_adj_seats: 0,
        }],
        ..RulesConfig::default()
    };
    let rules = Rules::try_from(config).unwrap();
    let err = Election::new(rules, vec![vec![1, 2, 3]]).err().unwrap();
    assert!(matches!(err, ElectionError::PartyCount { expected: 2, found: 3, .. }));
}
