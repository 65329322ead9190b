use super::{ElectionError, Result};
use crate::apportion::DivisorMethod;
use crate::methods::AdjustmentMethod;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituency {
    pub name: String,
    pub num_const_seats: u32,
    #[serde(default)]
    pub num_adj_seats: u32,
}

impl Constituency {
    pub fn total_seats(&self) -> u32 {
        self.num_const_seats + self.num_adj_seats
    }
}

/// Election rules as written in a rules file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub name: String,
    pub parties: Vec<String>,
    pub constituencies: Vec<Constituency>,
    pub primary_divider: String,
    pub adjustment_divider: String,
    /// Divider the adjustment method allocates with; `adjustment_divider` when unset.
    pub adjustment_allocation_divider: Option<String>,
    pub adjustment_threshold: f64,
    pub adjustment_method: String,
    pub debug: bool,
    pub show_entropy: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            parties: Vec::new(),
            constituencies: Vec::new(),
            primary_divider: DivisorMethod::DHondt.name().to_string(),
            adjustment_divider: DivisorMethod::DHondt.name().to_string(),
            adjustment_allocation_divider: None,
            adjustment_threshold: 0.05,
            adjustment_method: AdjustmentMethod::IcelandicLaw.name().to_string(),
            debug: false,
            show_entropy: false,
        }
    }
}

/// Validated election rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rules {
    pub name: String,
    pub parties: Vec<String>,
    pub constituencies: Vec<Constituency>,
    pub primary_divider: DivisorMethod,
    pub adjustment_divider: DivisorMethod,
    pub adjustment_allocation_divider: DivisorMethod,
    pub adjustment_threshold: f64,
    pub adjustment_method: AdjustmentMethod,
    pub debug: bool,
    pub show_entropy: bool,
}

impl Rules {
    pub fn num_parties(&self) -> usize {
        self.parties.len()
    }

    pub fn num_constituencies(&self) -> usize {
        self.constituencies.len()
    }

    /// Constituency plus adjustment seats, per constituency.
    pub fn seat_capacities(&self) -> Vec<u32> {
        self.constituencies.iter().map(Constituency::total_seats).collect()
    }

    pub fn total_seats(&self) -> u32 {
        self.seat_capacities().iter().sum()
    }

    pub fn total_adjustment_seats(&self) -> u32 {
        self.constituencies.iter().map(|c| c.num_adj_seats).sum()
    }

    pub fn with_method(&self, method: AdjustmentMethod) -> Rules {
        Rules {
            adjustment_method: method,
            ..self.clone()
        }
    }
}

impl TryFrom<RulesConfig> for Rules {
    type Error = ElectionError;

    fn try_from(config: RulesConfig) -> Result<Self> {
        if config.parties.is_empty() {
            return Err(ElectionError::Missing("parties"));
        }
        if config.constituencies.is_empty() {
            return Err(ElectionError::Missing("constituencies"));
        }
        let threshold = config.adjustment_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ElectionError::InvalidThreshold(threshold));
        }

        let adjustment_divider: DivisorMethod = config.adjustment_divider.parse()?;
        let adjustment_allocation_divider = match &config.adjustment_allocation_divider {
            Some(name) => name.parse()?,
            None => adjustment_divider,
        };

        Ok(Rules {
            name: config.name,
            parties: config.parties,
            constituencies: config.constituencies,
            primary_divider: config.primary_divider.parse()?,
            adjustment_divider,
            adjustment_allocation_divider,
            adjustment_threshold: threshold,
            adjustment_method: config.adjustment_method.parse()?,
            debug: config.debug,
            show_entropy: config.show_entropy,
        })
    }
}
