use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::{DebtError, Result};

/// schedule generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// installments later than `due_date + grace` end the schedule
    pub due_date_grace_days: i64,
    /// let the last installment absorb rounding residue so nothing is left over
    pub settle_final_installment: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            due_date_grace_days: 1,
            settle_final_installment: true,
        }
    }
}

impl ScheduleConfig {
    /// strict bound: installments must land on or before the due date
    pub fn strict() -> Self {
        Self {
            due_date_grace_days: 0,
            ..Self::default()
        }
    }

    /// raw arithmetic, no final-installment adjustment
    pub fn unadjusted() -> Self {
        Self {
            settle_final_installment: false,
            ..Self::default()
        }
    }

    pub fn grace(&self) -> Duration {
        Duration::days(self.due_date_grace_days)
    }

    pub fn validate(&self) -> Result<()> {
        if self.due_date_grace_days < 0 {
            return Err(DebtError::InvalidConfiguration {
                message: format!(
                    "due date grace must be non-negative, got {} days",
                    self.due_date_grace_days
                ),
            });
        }
        Ok(())
    }

    /// parse and validate from json
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScheduleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
