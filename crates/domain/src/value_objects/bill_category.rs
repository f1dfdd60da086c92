//! Bill category - electricity or water

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Utility a bill (and its forecast) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillCategory {
    /// Electricity, measured in units (kWh)
    #[default]
    Electricity,
    /// Water, measured in kiloliters
    Water,
}

impl BillCategory {
    /// Value used in query strings and JSON (`electricity`, `water`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Water => "water",
        }
    }
}

impl fmt::Display for BillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electricity" => Ok(Self::Electricity),
            "water" => Ok(Self::Water),
            _ => Err(DomainError::UnknownBillCategory(s.to_string())),
        }
    }
}
