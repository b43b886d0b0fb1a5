use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DebtError;

/// how the external service accrues interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    #[default]
    Simple,
    Compound,
}

impl FromStr for InterestType {
    type Err = DebtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(InterestType::Simple),
            "compound" => Ok(InterestType::Compound),
            _ => Err(DebtError::UnknownInterestType {
                value: s.to_string(),
            }),
        }
    }
}

/// unit used to space installments
///
/// Unrecognized units are kept verbatim in `Other`; the schedule builder
/// slices the created/due range evenly for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DurationUnit {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Other(String),
}

impl DurationUnit {
    pub fn as_str(&self) -> &str {
        match self {
            DurationUnit::Daily => "daily",
            DurationUnit::Weekly => "weekly",
            DurationUnit::Monthly => "monthly",
            DurationUnit::Yearly => "yearly",
            DurationUnit::Other(s) => s,
        }
    }

    /// true for units with calendar arithmetic
    pub fn is_calendar(&self) -> bool {
        !matches!(self, DurationUnit::Other(_))
    }
}

impl From<&str> for DurationUnit {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => DurationUnit::Daily,
            "weekly" => DurationUnit::Weekly,
            "monthly" => DurationUnit::Monthly,
            "yearly" => DurationUnit::Yearly,
            _ => DurationUnit::Other(s.to_string()),
        }
    }
}

impl From<String> for DurationUnit {
    fn from(s: String) -> Self {
        DurationUnit::from(s.as_str())
    }
}

impl From<DurationUnit> for String {
    fn from(unit: DurationUnit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// installment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    /// debt marked paid
    Settled,
    /// installment date has passed
    Due,
    /// installment date still ahead
    Upcoming,
}
