use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// Divisor sequence used by a highest-averages method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DivisorMethod {
    /// 1, 2, 3, 4, ...
    DHondt,
    /// 1, 3, 5, 7, ...
    SainteLague,
    /// 1.4, 3, 5, 7, ...
    NordicSainteLague,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown divider: {0}")]
pub struct UnknownDivider(pub String);

impl DivisorMethod {
    pub const ALL: [DivisorMethod; 3] = [
        DivisorMethod::DHondt,
        DivisorMethod::SainteLague,
        DivisorMethod::NordicSainteLague,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DivisorMethod::DHondt => "dhondt",
            DivisorMethod::SainteLague => "sainte-lague",
            DivisorMethod::NordicSainteLague => "nordic",
        }
    }

    /// The divisor at zero-based position `index`.
    pub fn term(self, index: u32) -> f64 {
        let k = f64::from(index);
        match self {
            DivisorMethod::DHondt => k + 1.0,
            DivisorMethod::SainteLague => 2.0 * k + 1.0,
            DivisorMethod::NordicSainteLague if index == 0 => 1.4,
            DivisorMethod::NordicSainteLague => 2.0 * k + 1.0,
        }
    }

    /// A fresh cursor positioned at the first term.
    pub fn divisors(self) -> Divisors {
        Divisors {
            method: self,
            position: 0,
        }
    }
}

impl fmt::Display for DivisorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DivisorMethod {
    type Err = UnknownDivider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dhondt" | "d'hondt" => Ok(DivisorMethod::DHondt),
            "sainte-lague" | "sainte_lague" => Ok(DivisorMethod::SainteLague),
            "nordic" | "swedish" => Ok(DivisorMethod::NordicSainteLague),
            _ => Err(UnknownDivider(s.to_string())),
        }
    }
}

impl TryFrom<String> for DivisorMethod {
    type Error = UnknownDivider;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DivisorMethod> for String {
    fn from(method: DivisorMethod) -> Self {
        method.name().to_string()
    }
}

/// Cursor over an infinite divisor sequence. Each contestant owns its own.
#[derive(Debug, Clone)]
pub struct Divisors {
    method: DivisorMethod,
    position: u32,
}

impl Divisors {
    pub fn current(&self) -> f64 {
        self.method.term(self.position)
    }

    /// Number of terms consumed so far.
    pub fn consumed(&self) -> u32 {
        self.position
    }

    /// Moves to the next term and returns the one just consumed.
    pub fn advance(&mut self) -> f64 {
        let consumed = self.current();
        self.position += 1;
        consumed
    }

    pub fn advance_n(&mut self, steps: u32) {
        self.position += steps;
    }
}

impl Iterator for Divisors {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.advance())
    }
}
