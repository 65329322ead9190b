use proptest::prelude::*;
use seat_apportion::apportion::{apportion1d, eliminate_constituencies, DivisorMethod};
use seat_apportion::model::{Constituency, Rules, RulesConfig};
use seat_apportion::{AdjustmentMethod, Election};
use std::convert::TryFrom;

fn divisor_method() -> impl Strategy<Value = DivisorMethod> {
    prop_oneof![
        Just(DivisorMethod::DHondt),
        Just(DivisorMethod::SainteLague),
        Just(DivisorMethod::NordicSainteLague),
    ]
}

fn adjustment_method() -> impl Strategy<Value = AdjustmentMethod> {
    (0..AdjustmentMethod::ALL.len()).prop_map(|i| AdjustmentMethod::ALL[i])
}

/// Rules and votes for 1-4 constituencies and 2-5 parties. Every constituency
/// gets at least one vote.
fn election() -> impl Strategy<Value = (Vec<(u32, u32)>, Vec<Vec<u64>>)> {
    (1usize..=4, 2usize..=5).prop_flat_map(|(constituencies, parties)| {
        (
            prop::collection::vec((0u32..8, 0u32..3), constituencies),
            prop::collection::vec(
                prop::collection::vec(0u64..5000, parties).prop_map(|mut row| {
                    row[0] += 1;
                    row
                }),
                constituencies,
            ),
        )
    })
}

fn rules(
    seats: &[(u32, u32)],
    parties: usize,
    method: AdjustmentMethod,
    divisor: DivisorMethod,
    threshold: f64,
) -> Rules {
    let config = RulesConfig {
        name: "property".to_string(),
        parties: (0..parties).map(|p| format!("P{}", p)).collect(),
        constituencies: seats
            .iter()
            .enumerate()
            .map(|(i, &(num_const_seats, num_adj_seats))| Constituency {
                name: format!("C{}", i),
                num_const_seats,
                num_adj_seats,
            })
            .collect(),
        primary_divider: divisor.name().to_string(),
        adjustment_divider: divisor.name().to_string(),
        adjustment_threshold: threshold,
        adjustment_method: method.name().to_string(),
        ..RulesConfig::default()
    };
    Rules::try_from(config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_constituency_is_filled(
        (seats, votes) in election(),
        method in adjustment_method(),
        divisor in divisor_method(),
        threshold in 0.0f64..=1.0,
    ) {
        let parties = votes[0].len();
        let rules = rules(&seats, parties, method, divisor, threshold);
        let capacities = rules.seat_capacities();
        let total = rules.total_seats();

        let results = Election::new(rules, votes).unwrap().run().unwrap();
        for (row, capacity) in results.seat_allocations.iter().zip(&capacities) {
            prop_assert_eq!(row.iter().sum::<u32>(), *capacity);
        }
        prop_assert_eq!(results.party_totals().iter().sum::<u32>(), total);
    }

    #[test]
    fn more_votes_never_cost_seats(
        votes in prop::collection::vec(0u64..10_000, 2..6),
        seats in 0u32..20,
        extra in 1u64..5_000,
        divisor in divisor_method(),
    ) {
        let before: Vec<f64> = votes.iter().map(|&v| v as f64).collect();
        let mut after = before.clone();
        after[0] += extra as f64;

        let seats_before = apportion1d(&before, seats, None, divisor).seats[0];
        let seats_after = apportion1d(&after, seats, None, divisor).seats[0];
        prop_assert!(seats_after >= seats_before);
    }

    #[test]
    fn apportion_awards_exactly_the_target_when_votes_exist(
        votes in prop::collection::vec(1u64..10_000, 1..6),
        seats in 0u32..30,
        divisor in divisor_method(),
    ) {
        let votes: Vec<f64> = votes.iter().map(|&v| v as f64).collect();
        let result = apportion1d(&votes, seats, None, divisor);
        prop_assert_eq!(result.seats.iter().sum::<u32>(), seats);
        prop_assert_eq!(result.rounds.len() as u32, seats);
    }

    #[test]
    fn threshold_elimination_is_idempotent(
        (_, votes) in election(),
        threshold in 0.0f64..=1.0,
    ) {
        let votes: Vec<Vec<f64>> = votes
            .iter()
            .map(|row| row.iter().map(|&v| v as f64).collect())
            .collect();
        let once = eliminate_constituencies(&votes, threshold).unwrap();
        match eliminate_constituencies(&once, threshold) {
            Ok(twice) => {
                prop_assert_eq!(once, twice);
            }
            // Every party fell below the threshold, so nothing is left to eliminate.
            Err(_) => {
                prop_assert!(once.iter().flatten().all(|&v| v == 0.0));
            }
        }
    }
}
