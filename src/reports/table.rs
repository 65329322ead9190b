//! Plain text tables for the terminal.

use crate::election::ElectionResults;
use crate::methods::AdjustmentMethod;
use itertools::Itertools;

fn render(header: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            std::iter::once(header)
                .chain(rows.iter().map(Vec::as_slice))
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &width))| {
                if i == 0 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .join("  ")
    };
    let rule = widths.iter().map(|&w| "-".repeat(w)).join("  ");

    std::iter::once(line(header))
        .chain(std::iter::once(rule))
        .chain(rows.iter().map(|row| line(row.as_slice())))
        .join("\n")
}

/// Seat allocation per constituency with a totals row and column.
pub fn results_table(results: &ElectionResults) -> String {
    let rules = &results.rules;
    let header: Vec<String> = std::iter::once("Constituency".to_string())
        .chain(rules.parties.iter().cloned())
        .chain(std::iter::once("Total".to_string()))
        .collect();

    let names = rules
        .constituencies
        .iter()
        .map(|c| c.name.clone())
        .chain(std::iter::once("Total".to_string()));
    let rows: Vec<Vec<String>> = names
        .zip(results.with_totals())
        .map(|(name, seats)| {
            std::iter::once(name)
                .chain(seats.iter().map(u32::to_string))
                .collect()
        })
        .collect();

    render(&header, &rows)
}

/// Deviation and party totals for each adjustment method.
pub fn comparison_table(parties: &[String], compared: &[(AdjustmentMethod, ElectionResults)]) -> String {
    let header: Vec<String> = ["Method".to_string(), "Deviation".to_string()]
        .iter()
        .cloned()
        .chain(parties.iter().cloned())
        .collect();
    let rows: Vec<Vec<String>> = compared
        .iter()
        .map(|(method, results)| {
            [method.name().to_string(), results.deviation.to_string()]
                .iter()
                .cloned()
                .chain(results.party_totals().iter().map(u32::to_string))
                .collect()
        })
        .collect();
    render(&header, &rows)
}
