use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::types::{DurationUnit, InterestType};

/// normalized debt record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// principal, always positive
    pub amount: Money,
    /// flat fee on top of interest
    pub premium_amount: Option<Money>,
    /// nominal rate, only forwarded to the interest service
    pub percentage: Option<Rate>,
    pub interest_type: InterestType,
    /// schedule anchor
    pub created_at: Option<DateTime<Utc>>,
    /// schedule end bound
    pub due_date: Option<DateTime<Utc>>,
    /// total number of installments, kept as received
    pub frequency: Option<String>,
    pub duration: Option<DurationUnit>,
    pub is_paid: bool,
}

impl Debt {
    pub fn new(amount: Money, created_at: DateTime<Utc>) -> Self {
        Self {
            amount,
            premium_amount: None,
            percentage: None,
            interest_type: InterestType::Simple,
            created_at: Some(created_at),
            due_date: None,
            frequency: None,
            duration: None,
            is_paid: false,
        }
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_installments(mut self, frequency: impl Into<String>, duration: DurationUnit) -> Self {
        self.frequency = Some(frequency.into());
        self.duration = Some(duration);
        self
    }

    pub fn with_premium(mut self, premium: Money) -> Self {
        self.premium_amount = Some(premium);
        self
    }

    pub fn with_rate(mut self, percentage: Rate, interest_type: InterestType) -> Self {
        self.percentage = Some(percentage);
        self.interest_type = interest_type;
        self
    }

    pub fn with_paid(mut self, is_paid: bool) -> Self {
        self.is_paid = is_paid;
        self
    }

    /// total premium, absent premium counts as zero
    pub fn total_premium(&self) -> Money {
        self.premium_amount.unwrap_or(Money::ZERO)
    }

    /// installment count parsed from `frequency`
    ///
    /// Any decimal with a zero fraction counts, so `"12"`, `"12.0"` and a JSON
    /// `12.0` all give 12. Fractional, non-positive, non-numeric or out-of-range
    /// values give `None`.
    pub fn installment_count(&self) -> Option<u32> {
        let count = Decimal::from_str(self.frequency.as_deref()?.trim()).ok()?;
        if !count.fract().is_zero() || !count.is_sign_positive() {
            return None;
        }
        count.trunc().to_u32().filter(|n| *n > 0)
    }

    /// parse a raw api payload
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDebt = serde_json::from_str(json)?;
        Debt::try_from(raw)
    }
}

/// debt as delivered by the api: numbers and dates may arrive as strings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDebt {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub premium_amount: Option<Value>,
    #[serde(default)]
    pub percentage: Option<Value>,
    #[serde(default)]
    pub interest_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub frequency: Option<Value>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub is_paid: Option<Value>,
}

impl TryFrom<RawDebt> for Debt {
    type Error = DebtError;

    fn try_from(raw: RawDebt) -> Result<Self> {
        let amount = match scalar_text(raw.amount.as_ref()) {
            Some(text) => parse_money("amount", &text)?,
            None => {
                return Err(DebtError::InvalidAmount {
                    field: "amount",
                    value: "missing".to_string(),
                })
            }
        };
        if !amount.is_positive() {
            return Err(DebtError::InvalidAmount {
                field: "amount",
                value: amount.to_string(),
            });
        }

        let premium_amount = scalar_text(raw.premium_amount.as_ref())
            .map(|text| parse_money("premiumAmount", &text))
            .transpose()?;
        if let Some(premium) = premium_amount {
            if premium.is_negative() {
                return Err(DebtError::InvalidAmount {
                    field: "premiumAmount",
                    value: premium.to_string(),
                });
            }
        }

        let percentage = scalar_text(raw.percentage.as_ref())
            .map(|text| {
                Decimal::from_str(&text)
                    .map(Rate::from_percentage_decimal)
                    .map_err(|_| DebtError::InvalidRate { value: text })
            })
            .transpose()?;

        let interest_type = match non_empty(raw.interest_type) {
            Some(text) => text.parse()?,
            None => InterestType::default(),
        };

        let created_at = non_empty(raw.created_at)
            .map(|text| parse_timestamp("createdAt", &text))
            .transpose()?;
        let due_date = non_empty(raw.due_date)
            .map(|text| parse_timestamp("dueDate", &text))
            .transpose()?;

        Ok(Debt {
            amount,
            premium_amount,
            percentage,
            interest_type,
            created_at,
            due_date,
            frequency: scalar_text(raw.frequency.as_ref()),
            duration: non_empty(raw.duration).map(DurationUnit::from),
            is_paid: parse_flag(raw.is_paid.as_ref()),
        })
    }
}

/// parse a timestamp in any of the formats the api emits
pub fn parse_timestamp(field: &'static str, text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(DebtError::InvalidDate {
        field,
        value: text.to_string(),
    })
}

fn parse_money(field: &'static str, text: &str) -> Result<Money> {
    Money::from_str_exact(text).map_err(|_| DebtError::InvalidAmount {
        field,
        value: text.to_string(),
    })
}

// strings and numbers both become text; null and blank become None
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}
