//! Results workbook.
//!
//! The first sheet holds the votes in the layout `formats::read_votes` expects,
//! so a written workbook can be read back as input. The second sheet stacks the
//! constituency, adjustment and total seat tables, then the national targets
//! and the deviation.

use super::ReportResult;
use crate::election::ElectionResults;
use crate::model::{add_totals, AllocationMatrix};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs::create_dir_all;
use std::path::Path;

type Rows = Vec<(String, Vec<f64>)>;

pub fn write_xlsx(path: &Path, votes: &[Vec<u64>], results: &ElectionResults) -> ReportResult<()> {
    let rules = &results.rules;
    let bold = Format::new().set_bold();
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Votes")?;
    let vote_rows: Rows = rules
        .constituencies
        .iter()
        .zip(votes)
        .map(|(c, row)| (c.name.clone(), row.iter().map(|&v| v as f64).collect()))
        .collect();
    write_table(sheet, 0, "Constituency", &rules.parties, &vote_rows, &bold)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Results")?;
    sheet.write_string_with_format(0, 0, rules.name.as_str(), &bold)?;
    sheet.write_string(1, 0, "Adjustment method")?;
    sheet.write_string(1, 1, rules.adjustment_method.name())?;

    let mut columns = rules.parties.clone();
    columns.push("Total".to_string());
    let mut row = 3;
    for (title, matrix) in [
        ("Constituency seats", results.constituency_seats.clone()),
        ("Adjustment seats", adjustment_seats(results)),
        ("Total seats", results.seat_allocations.clone()),
    ] {
        let rows = seat_rows(results, &matrix);
        row = write_table(sheet, row, title, &columns, &rows, &bold)? + 1;
    }

    let national: Rows = [
        ("Party targets", &results.party_targets),
        ("Adjustment entitlement", &results.adjustment_entitlement),
    ]
    .iter()
    .map(|(label, values)| {
        let mut values: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        values.push(values.iter().sum());
        (label.to_string(), values)
    })
    .collect();
    row = write_table(sheet, row, "National", &columns, &national, &bold)? + 1;

    sheet.write_string_with_format(row, 0, "Deviation", &bold)?;
    sheet.write_number(row, 1, f64::from(results.deviation))?;
    if let Some(entropy) = results.entropy {
        sheet.write_string_with_format(row + 1, 0, "Entropy", &bold)?;
        sheet.write_number(row + 1, 1, entropy)?;
    }

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    workbook.save(path)?;
    Ok(())
}

fn adjustment_seats(results: &ElectionResults) -> AllocationMatrix {
    results
        .seat_allocations
        .iter()
        .zip(&results.constituency_seats)
        .map(|(total, primary)| {
            total
                .iter()
                .zip(primary)
                .map(|(t, p)| t.saturating_sub(*p))
                .collect()
        })
        .collect()
}

/// Seat rows labelled by constituency, with the totals row and column.
fn seat_rows(results: &ElectionResults, matrix: &[Vec<u32>]) -> Rows {
    results
        .rules
        .constituencies
        .iter()
        .map(|c| c.name.clone())
        .chain(std::iter::once("Total".to_string()))
        .zip(add_totals(matrix))
        .map(|(name, seats)| (name, seats.into_iter().map(f64::from).collect()))
        .collect()
}

/// Writes a header row and labelled rows from `first_row` on. Returns the
/// first row below the table.
fn write_table(
    sheet: &mut Worksheet,
    first_row: u32,
    corner: &str,
    columns: &[String],
    rows: &[(String, Vec<f64>)],
    bold: &Format,
) -> ReportResult<u32> {
    sheet.write_string_with_format(first_row, 0, corner, bold)?;
    for (column, name) in (1u16..).zip(columns) {
        sheet.write_string_with_format(first_row, column, name.as_str(), bold)?;
    }
    let mut row = first_row;
    for (label, values) in rows {
        row += 1;
        sheet.write_string(row, 0, label.as_str())?;
        for (column, &value) in (1u16..).zip(values) {
            sheet.write_number(row, column, value)?;
        }
    }
    Ok(row + 1)
}
