//! Loading rules and votes from disk.

pub mod spreadsheet;

use crate::model::{ElectionError, Rules, RulesConfig, VotesMatrix};
use std::convert::TryFrom;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Invalid rules: {0}")]
    Rules(#[from] ElectionError),
    #[error("Spreadsheet {0} has no sheets")]
    NoSheets(String),
    #[error("Row {row}, column {column}: {message}")]
    Cell {
        row: usize,
        column: usize,
        message: String,
    },
    #[error("Expected {what} {expected:?}, found {found:?}")]
    Mismatch {
        what: &'static str,
        expected: String,
        found: String,
    },
    #[error("Unsupported votes file: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// Reads and validates a JSON rules file.
pub fn read_rules(path: &Path) -> Result<Rules> {
    let reader = BufReader::new(File::open(path)?);
    let config: RulesConfig = serde_json::from_reader(reader)?;
    Ok(Rules::try_from(config)?)
}

/// Reads a votes matrix, by file extension: JSON (`[[u64]]`) or a spreadsheet.
pub fn read_votes(path: &Path, rules: &Rules) -> Result<VotesMatrix> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "json" => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(reader)?)
        }
        "xlsx" | "xlsm" | "xls" | "ods" => spreadsheet::read_votes(path, rules),
        _ => Err(FormatError::Unsupported(path.display().to_string())),
    }
}
