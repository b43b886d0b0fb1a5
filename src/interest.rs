use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::types::{DurationUnit, InterestType};

/// lookup key for the external interest service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRequest {
    pub amount: Money,
    pub percentage: Option<Rate>,
    pub interest_type: InterestType,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Option<DurationUnit>,
}

impl InterestRequest {
    /// build the request for a debt; `None` without both range dates
    pub fn for_debt(debt: &Debt) -> Option<Self> {
        Some(Self {
            amount: debt.amount,
            percentage: debt.percentage,
            interest_type: debt.interest_type,
            start: debt.created_at?,
            end: debt.due_date?,
            duration: debt.duration.clone(),
        })
    }
}

/// source of total interest over a debt's life
///
/// The schedule treats the figure as opaque; rate math lives behind this trait.
pub trait InterestSource {
    fn total_interest(&self, request: &InterestRequest) -> Result<Money>;
}

/// a precomputed figure, e.g. a cached service response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedInterest(pub Money);

impl InterestSource for FixedInterest {
    fn total_interest(&self, _request: &InterestRequest) -> Result<Money> {
        Ok(self.0)
    }
}

impl InterestSource for Money {
    fn total_interest(&self, _request: &InterestRequest) -> Result<Money> {
        Ok(*self)
    }
}

/// resolve total interest for a debt through a source
pub fn resolve_total_interest(debt: &Debt, source: &dyn InterestSource) -> Result<Money> {
    let request = InterestRequest::for_debt(debt).ok_or_else(|| DebtError::InterestUnavailable {
        message: "debt has no created/due date range".to_string(),
    })?;
    source.total_interest(&request).map(clamp_interest)
}

/// negative interest is treated as none
pub fn clamp_interest(total_interest: Money) -> Money {
    total_interest.max(Money::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Unavailable;

    impl InterestSource for Unavailable {
        fn total_interest(&self, _request: &InterestRequest) -> Result<Money> {
            Err(DebtError::InterestUnavailable {
                message: "service timeout".to_string(),
            })
        }
    }

    fn debt() -> Debt {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Debt::new(Money::from_major(1200), start)
            .with_due_date(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap())
            .with_rate(Rate::from_percentage(10), InterestType::Simple)
    }

    #[test]
    fn test_request_carries_debt_terms() {
        let request = InterestRequest::for_debt(&debt()).unwrap();
        assert_eq!(request.amount, Money::from_major(1200));
        assert_eq!(request.percentage, Some(Rate::from_percentage(10)));
        assert_eq!(request.interest_type, InterestType::Simple);
    }

    #[test]
    fn test_request_requires_range() {
        let mut open_ended = debt();
        open_ended.due_date = None;
        assert!(InterestRequest::for_debt(&open_ended).is_none());
        assert!(resolve_total_interest(&open_ended, &FixedInterest(Money::from_major(5))).is_err());
    }

    #[test]
    fn test_fixed_source() {
        let total = resolve_total_interest(&debt(), &FixedInterest(Money::from_major(120))).unwrap();
        assert_eq!(total, Money::from_major(120));
    }

    #[test]
    fn test_negative_interest_clamped() {
        let total = resolve_total_interest(&debt(), &Money::from_major(-3)).unwrap();
        assert_eq!(total, Money::ZERO);
    }

    #[test]
    fn test_failing_source_propagates() {
        let err = resolve_total_interest(&debt(), &Unavailable).unwrap_err();
        assert!(matches!(err, DebtError::InterestUnavailable { .. }));
    }
}
