use crate::apportion::DivisorMethod;

/// Sum of `ln(votes / divisor)` over every seat won, with each party's divisor
/// sequence restarting in every constituency. Cells without votes add nothing.
pub fn entropy(votes: &[Vec<f64>], allocations: &[Vec<u32>], method: DivisorMethod) -> f64 {
    votes
        .iter()
        .zip(allocations)
        .flat_map(|(row, seats)| row.iter().zip(seats))
        .filter(|&(&v, _)| v > 0.0)
        .map(|(&v, &won)| {
            method
                .divisors()
                .take(won as usize)
                .map(|d| (v / d).ln())
                .sum::<f64>()
        })
        .sum()
}
