pub mod builder;
pub mod calendar;
pub mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::InstallmentStatus;

pub use builder::{build_schedule, ScheduleBuilder};
pub use calendar::installment_date;
pub use status::{classify, StatusClassifier};

/// one scheduled payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    /// 1-based position in the schedule
    pub number: u32,
    pub date: DateTime<Utc>,
    pub status: InstallmentStatus,
    pub installment_amount: Money,
    pub principal_for_period: Money,
    pub interest_for_period: Money,
    pub cumulative_principal_paid: Money,
    pub cumulative_interest_paid: Money,
    pub remaining_principal: Money,
}

/// installment schedule derived from a debt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub installments: Vec<Installment>,
    /// installment count the debt asked for; may exceed `len()` when dates overrun the due date
    pub requested_installments: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_premium: Money,
    /// last requested installment was emitted and absorbed the rounding residue
    #[serde(default)]
    pub final_settled: bool,
}

impl Schedule {
    /// schedule with no installments, keeping the debt totals
    pub fn empty(total_principal: Money, total_interest: Money, total_premium: Money) -> Self {
        Self {
            installments: Vec::new(),
            requested_installments: 0,
            total_principal,
            total_interest,
            total_premium,
            final_settled: false,
        }
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Installment> {
        self.installments.get(index)
    }

    pub fn last(&self) -> Option<&Installment> {
        self.installments.last()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Installment> {
        self.installments.iter()
    }

    /// true when installments were dropped for landing past the due date
    pub fn is_truncated(&self) -> bool {
        (self.len() as u64) < self.requested_installments as u64
    }

    /// index of the first upcoming installment
    pub fn first_upcoming(&self) -> Option<usize> {
        self.installments
            .iter()
            .position(|i| i.status == InstallmentStatus::Upcoming)
    }

    pub fn count_by_status(&self, status: InstallmentStatus) -> usize {
        self.installments.iter().filter(|i| i.status == status).count()
    }

    /// date of the next upcoming installment
    pub fn next_due_date(&self) -> Option<DateTime<Utc>> {
        self.first_upcoming()
            .and_then(|idx| self.get(idx))
            .map(|i| i.date)
    }

    /// per-period payment, uniform across the schedule
    pub fn installment_amount(&self) -> Option<Money> {
        self.installments.first().map(|i| i.installment_amount)
    }

    pub fn total_payable(&self) -> Money {
        self.total_principal + self.total_interest + self.total_premium
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Installment;
    type IntoIter = std::slice::Iter<'a, Installment>;

    fn into_iter(self) -> Self::IntoIter {
        self.installments.iter()
    }
}
