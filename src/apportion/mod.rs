//! Highest-averages apportionment and threshold elimination.

pub mod divisors;
pub mod threshold;

pub use divisors::{DivisorMethod, Divisors, UnknownDivider};
pub use threshold::{eliminate_constituencies, eliminate_satisfied, eliminate_totals, NoVotes};

use serde::Serialize;

/// One awarded seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Round {
    pub winner: usize,
    /// Quotient that won the seat.
    pub quotient: f64,
    pub divisor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Apportionment {
    pub seats: Vec<u32>,
    /// Last divisor each contestant consumed, 0 for contestants without seats.
    pub last_divisors: Vec<f64>,
    pub rounds: Vec<Round>,
    /// Seats left over because no contestant had a positive quotient.
    pub unawarded: u32,
}

impl Apportionment {
    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }
}

/// Highest-averages apportionment of `total_seats` among contestants.
///
/// `priors` are seats already held; each contestant's divisor cursor starts past
/// them, and only `total_seats - sum(priors)` new seats are awarded. The first
/// index with the maximum quotient wins a tie. A seat is only awarded on a
/// strictly positive quotient.
///
/// # Panics
///
/// Panics if `priors` is given and its length differs from `votes`.
pub fn apportion1d(
    votes: &[f64],
    total_seats: u32,
    priors: Option<&[u32]>,
    method: DivisorMethod,
) -> Apportionment {
    let mut seats: Vec<u32> = match priors {
        Some(priors) => {
            assert_eq!(priors.len(), votes.len(), "priors must match contestants");
            priors.to_vec()
        }
        None => vec![0; votes.len()],
    };
    let mut cursors: Vec<Divisors> = seats
        .iter()
        .map(|&held| {
            let mut cursor = method.divisors();
            cursor.advance_n(held);
            cursor
        })
        .collect();
    let mut last_divisors: Vec<f64> = seats
        .iter()
        .map(|&held| if held == 0 { 0.0 } else { method.term(held - 1) })
        .collect();

    let already: u32 = seats.iter().sum();
    let to_award = total_seats.saturating_sub(already);
    let mut rounds = Vec::with_capacity(to_award as usize);

    for _ in 0..to_award {
        let best = votes
            .iter()
            .zip(&cursors)
            .map(|(&v, cursor)| v / cursor.current())
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, q)| match best {
                Some((_, b)) if b >= q => best,
                _ => Some((i, q)),
            });

        let (winner, quotient) = match best {
            Some((winner, quotient)) if quotient > 0.0 => (winner, quotient),
            _ => break,
        };
        let divisor = cursors[winner].advance();
        seats[winner] += 1;
        last_divisors[winner] = divisor;
        rounds.push(Round {
            winner,
            quotient,
            divisor,
        });
    }

    let unawarded = to_award - rounds.len() as u32;
    Apportionment {
        seats,
        last_divisors,
        rounds,
        unawarded,
    }
}

/// Quotient a contestant holding `held` seats competes with for its next one.
pub fn next_quotient(votes: f64, held: u32, method: DivisorMethod) -> f64 {
    votes / method.term(held)
}
