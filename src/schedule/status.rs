use chrono::{DateTime, Utc};

use crate::debt::Debt;
use crate::types::InstallmentStatus;

/// classify one installment
///
/// A paid debt settles every installment regardless of date. Otherwise an
/// installment is due once `now` is strictly past its date.
pub fn classify(debt: &Debt, installment_date: DateTime<Utc>, now: DateTime<Utc>) -> InstallmentStatus {
    StatusClassifier::new(debt, now).classify(installment_date)
}

/// classifier pinned to a single `now` for a whole schedule pass
#[derive(Debug, Clone, Copy)]
pub struct StatusClassifier {
    is_paid: bool,
    now: DateTime<Utc>,
}

impl StatusClassifier {
    pub fn new(debt: &Debt, now: DateTime<Utc>) -> Self {
        Self {
            is_paid: debt.is_paid,
            now,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn classify(&self, installment_date: DateTime<Utc>) -> InstallmentStatus {
        if self.is_paid {
            InstallmentStatus::Settled
        } else if self.now > installment_date {
            InstallmentStatus::Due
        } else {
            InstallmentStatus::Upcoming
        }
    }
}
