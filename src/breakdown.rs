use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::decimal::{Money, Rate};
use crate::interest::clamp_interest;
use crate::schedule::Schedule;

/// cumulative financial snapshot at a point in the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub premium_paid: Money,
    pub remaining_principal: Money,
    pub total_payable: Money,
    pub status_as_of_date: DateTime<Utc>,
    /// installment the snapshot was taken at, `None` for the fallback snapshot
    pub selected_index: Option<usize>,
}

impl Breakdown {
    pub fn total_paid(&self) -> Money {
        self.principal_paid + self.interest_paid + self.premium_paid
    }

    /// what is left of the total payable
    pub fn outstanding(&self) -> Money {
        self.total_payable - self.total_paid()
    }

    /// slices for composition charts, shares relative to total payable
    pub fn composition(&self) -> Vec<CompositionSlice> {
        [
            (BreakdownComponent::PrincipalPaid, self.principal_paid),
            (BreakdownComponent::InterestPaid, self.interest_paid),
            (BreakdownComponent::PremiumPaid, self.premium_paid),
            (BreakdownComponent::RemainingPrincipal, self.remaining_principal),
        ]
        .into_iter()
        .map(|(component, amount)| CompositionSlice {
            component,
            amount,
            share: amount.share_of(self.total_payable),
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakdownComponent {
    PrincipalPaid,
    InterestPaid,
    PremiumPaid,
    RemainingPrincipal,
}

impl BreakdownComponent {
    pub fn label(&self) -> &'static str {
        match self {
            BreakdownComponent::PrincipalPaid => "Principal paid",
            BreakdownComponent::InterestPaid => "Interest paid",
            BreakdownComponent::PremiumPaid => "Premium paid",
            BreakdownComponent::RemainingPrincipal => "Remaining principal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSlice {
    pub component: BreakdownComponent,
    pub amount: Money,
    pub share: Rate,
}

/// breakdown as of `selected_index`
///
/// Premium is amortized evenly by position, not read from installment running
/// sums. A truncated paid schedule reports the remainder left at its last
/// installment rather than zero. An empty schedule or a missing/out-of-range index falls back to an
/// all-or-nothing snapshot driven by the debt's paid flag.
pub fn compute_breakdown(
    schedule: &Schedule,
    selected_index: Option<usize>,
    debt: &Debt,
    total_interest: Money,
    now: DateTime<Utc>,
) -> Breakdown {
    let total_principal = debt.amount;
    let total_interest = clamp_interest(total_interest);
    let total_premium = debt.total_premium();
    let total_payable = total_principal + total_interest + total_premium;

    let selected = selected_index.and_then(|idx| schedule.get(idx).map(|installment| (idx, installment)));

    match selected {
        Some((idx, installment)) => {
            // a settled final installment clears the premium residue like principal and interest
            let premium_paid = if schedule.final_settled && idx + 1 == schedule.len() {
                total_premium
            } else {
                total_premium.split(schedule.len() as u32) * Decimal::from(idx as u64 + 1)
            };

            Breakdown {
                principal_paid: installment.cumulative_principal_paid,
                interest_paid: installment.cumulative_interest_paid,
                premium_paid,
                remaining_principal: installment.remaining_principal,
                total_payable,
                status_as_of_date: installment.date,
                selected_index: Some(idx),
            }
        }
        None if debt.is_paid => Breakdown {
            principal_paid: total_principal,
            interest_paid: total_interest,
            premium_paid: total_premium,
            remaining_principal: Money::ZERO,
            total_payable,
            status_as_of_date: debt.due_date.unwrap_or(now),
            selected_index: None,
        },
        None => Breakdown {
            principal_paid: Money::ZERO,
            interest_paid: Money::ZERO,
            premium_paid: Money::ZERO,
            remaining_principal: total_principal,
            total_payable,
            status_as_of_date: debt.due_date.unwrap_or(now),
            selected_index: None,
        },
    }
}
