//! Votes from the first sheet of a workbook.
//!
//! The header row names the parties after a leading constituency column; each
//! following row is one constituency. Names must match the rules, in order.
//! Blank rows are skipped and blank cells count as zero votes.

use super::{FormatError, Result};
use crate::model::{Rules, VotesMatrix};
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::Path;

pub fn read_votes(path: &Path, rules: &Rules) -> Result<VotesMatrix> {
    let mut workbook = open_workbook_auto(path)?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FormatError::NoSheets(path.display().to_string()))?;
    let sheet = workbook
        .worksheet_range(&first_sheet)
        .ok_or_else(|| FormatError::NoSheets(path.display().to_string()))??;

    votes_from_rows(sheet.rows(), rules)
}

pub(crate) fn votes_from_rows<'a>(
    rows: impl Iterator<Item = &'a [DataType]>,
    rules: &Rules,
) -> Result<VotesMatrix> {
    let mut rows = rows
        .enumerate()
        .filter(|(_, row)| row.iter().any(|cell| *cell != DataType::Empty));

    let (_, header) = rows.next().ok_or(FormatError::Mismatch {
        what: "header row with parties",
        expected: rules.parties.join(", "),
        found: String::new(),
    })?;
    let parties: Vec<String> = header
        .iter()
        .skip(1)
        .map(|cell| cell.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if parties != rules.parties {
        return Err(FormatError::Mismatch {
            what: "parties",
            expected: rules.parties.join(", "),
            found: parties.join(", "),
        });
    }

    let mut votes = VotesMatrix::new();
    for (row_index, row) in rows {
        let name = row.first().map(|c| c.to_string()).unwrap_or_default();
        let expected = rules.constituencies.get(votes.len()).map(|c| c.name.as_str());
        if expected != Some(name.trim()) {
            return Err(FormatError::Mismatch {
                what: "constituency",
                expected: expected.unwrap_or("no more constituencies").to_string(),
                found: name,
            });
        }
        let counts = (1..=parties.len())
            .map(|column| vote_count(row.get(column), row_index, column))
            .collect::<Result<Vec<u64>>>()?;
        votes.push(counts);
    }
    Ok(votes)
}

fn vote_count(cell: Option<&DataType>, row: usize, column: usize) -> Result<u64> {
    let invalid = |message: String| FormatError::Cell {
        row: row + 1,
        column: column + 1,
        message,
    };
    match cell {
        None | Some(DataType::Empty) => Ok(0),
        Some(DataType::Int(v)) if *v >= 0 => Ok(*v as u64),
        Some(DataType::Float(v)) if *v >= 0.0 && v.fract() == 0.0 => Ok(*v as u64),
        Some(DataType::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| invalid(format!("not a vote count: {:?}", s))),
        Some(other) => Err(invalid(format!("not a vote count: {}", other))),
    }
}
