use crate::election::ElectionResults;
use crate::methods::AdjustmentMethod;
use crate::util::write_serialized;
use serde::Serialize;
use std::path::Path;

pub mod table;
pub mod xlsx;

pub use table::{comparison_table, results_table};
pub use xlsx::write_xlsx;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Results as written to disk, with the totals row and column included.
#[derive(Debug, Serialize)]
pub struct ResultsReport<'a> {
    pub rules: &'a crate::model::Rules,
    pub seat_allocations: Vec<Vec<u32>>,
    pub party_targets: &'a [u32],
    pub adjustment_entitlement: &'a [u32],
    pub deviation: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entropy: Option<f64>,
}

impl<'a> From<&'a ElectionResults> for ResultsReport<'a> {
    fn from(results: &'a ElectionResults) -> Self {
        Self {
            rules: &results.rules,
            seat_allocations: results.with_totals(),
            party_targets: &results.party_targets,
            adjustment_entitlement: &results.adjustment_entitlement,
            deviation: results.deviation,
            entropy: results.entropy,
        }
    }
}

/// One line of a method comparison.
#[derive(Debug, Serialize)]
pub struct MethodSummary {
    pub method: AdjustmentMethod,
    pub deviation: u32,
    pub party_totals: Vec<u32>,
}

pub fn summarize(compared: &[(AdjustmentMethod, ElectionResults)]) -> Vec<MethodSummary> {
    compared
        .iter()
        .map(|(method, results)| MethodSummary {
            method: *method,
            deviation: results.deviation,
            party_totals: results.party_totals(),
        })
        .collect()
}

pub fn results_json(results: &ElectionResults) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(&ResultsReport::from(results))?)
}

pub fn write_results(path: &Path, results: &ElectionResults) -> ReportResult<()> {
    write_serialized(path, &ResultsReport::from(results))?;
    Ok(())
}

/// Writes results by file extension: a workbook for `.xlsx`, JSON otherwise.
pub fn write_report(path: &Path, votes: &[Vec<u64>], results: &ElectionResults) -> ReportResult<()> {
    let is_workbook = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("xlsx"));
    if is_workbook {
        write_xlsx(path, votes, results)
    } else {
        write_results(path, results)
    }
}

pub fn write_comparison(
    path: &Path,
    compared: &[(AdjustmentMethod, ElectionResults)],
) -> ReportResult<()> {
    write_serialized(path, &summarize(compared))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::Election;
    use crate::model::{Constituency, Rules, RulesConfig};
    use std::convert::TryFrom;

    fn results() -> (Vec<Vec<u64>>, ElectionResults) {
        let config = RulesConfig {
            name: "report".to_string(),
            parties: vec!["A".to_string(), "B".to_string()],
            constituencies: vec![Constituency {
                name: "Only".to_string(),
                num_const_seats: 3,
                num_adj_seats: 0,
            }],
            ..RulesConfig::default()
        };
        let votes = vec![vec![300, 100]];
        let rules = Rules::try_from(config).unwrap();
        let results = Election::new(rules, votes.clone()).unwrap().run().unwrap();
        (votes, results)
    }

    #[test]
    fn extension_picks_the_output_format() {
        let (votes, results) = results();
        let dir = std::env::temp_dir().join(format!("seat-apportion-{}-reports", std::process::id()));
        let json = dir.join("results.json");
        let workbook = dir.join("results.XLSX");

        write_report(&json, &votes, &results).unwrap();
        write_report(&workbook, &votes, &results).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(written["seat_allocations"], serde_json::json!([[3, 0, 3], [3, 0, 3]]));
        assert_eq!(&std::fs::read(&workbook).unwrap()[..2], b"PK");

        std::fs::remove_dir_all(dir).unwrap();
    }
}
