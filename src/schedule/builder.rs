use chrono::{DateTime, Utc};

use crate::config::ScheduleConfig;
use crate::debt::Debt;
use crate::decimal::Money;
use crate::interest::clamp_interest;
use crate::schedule::calendar::installment_date;
use crate::schedule::status::StatusClassifier;
use crate::schedule::{Installment, Schedule};

/// build a schedule with default settings
pub fn build_schedule(debt: &Debt, total_interest: Money, now: DateTime<Utc>) -> Schedule {
    ScheduleBuilder::default().build(debt, total_interest, now)
}

/// flat-amortization schedule builder
///
/// Principal and interest are each split evenly over the requested installment
/// count. Dates step from `created_at` by the debt's duration unit and stop once
/// one lands past `due_date` plus the configured grace.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    config: ScheduleConfig,
}

impl ScheduleBuilder {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// build the schedule; `now` is sampled by the caller once for the whole pass
    pub fn build(&self, debt: &Debt, total_interest: Money, now: DateTime<Utc>) -> Schedule {
        let total_principal = debt.amount;
        let total_interest = clamp_interest(total_interest);
        let total_premium = debt.total_premium();
        let empty = Schedule::empty(total_principal, total_interest, total_premium);

        let (Some(start), Some(due), Some(unit)) = (debt.created_at, debt.due_date, debt.duration.as_ref()) else {
            tracing::debug!(
                has_created_at = debt.created_at.is_some(),
                has_due_date = debt.due_date.is_some(),
                has_duration = debt.duration.is_some(),
                "schedule skipped: missing dates or duration"
            );
            return empty;
        };
        let Some(count) = debt.installment_count() else {
            tracing::debug!(frequency = ?debt.frequency, "schedule skipped: frequency is not a positive integer");
            return empty;
        };

        let interest_per_installment = if total_interest.is_positive() {
            total_interest.split(count)
        } else {
            Money::ZERO
        };
        let principal_per_installment = total_principal.split(count);
        let installment_amount = principal_per_installment + interest_per_installment;

        let bound = due + self.config.grace();
        let classifier = StatusClassifier::new(debt, now);

        // count comes straight from the payload; truncation usually stops far short of it
        let mut installments = Vec::new();
        let mut cumulative_principal = Money::ZERO;
        let mut cumulative_interest = Money::ZERO;
        let mut final_settled = false;

        for i in 1..=count {
            let date = match installment_date(start, due, unit, i, count) {
                Some(date) if date <= bound => date,
                _ => {
                    tracing::debug!(
                        emitted = installments.len(),
                        requested = count,
                        unit = %unit,
                        "schedule truncated at due date"
                    );
                    break;
                }
            };

            cumulative_principal += principal_per_installment;
            cumulative_interest += interest_per_installment;

            // absorb 8dp residue so the final installment clears the debt
            if i == count && self.config.settle_final_installment {
                cumulative_principal = total_principal;
                cumulative_interest = total_interest;
                final_settled = true;
            }

            installments.push(Installment {
                number: i,
                date,
                status: classifier.classify(date),
                installment_amount,
                principal_for_period: principal_per_installment,
                interest_for_period: interest_per_installment,
                cumulative_principal_paid: cumulative_principal,
                cumulative_interest_paid: cumulative_interest,
                remaining_principal: total_principal - cumulative_principal,
            });
        }

        tracing::debug!(
            installments = installments.len(),
            requested = count,
            %installment_amount,
            "schedule built"
        );

        Schedule {
            installments,
            requested_installments: count,
            total_principal,
            total_interest,
            total_premium,
            final_settled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DurationUnit, InstallmentStatus};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn monthly_debt() -> Debt {
        Debt::new(Money::from_major(1200), ymd(2024, 1, 1))
            .with_due_date(ymd(2024, 12, 31))
            .with_installments("12", DurationUnit::Monthly)
    }

    #[test]
    fn test_monthly_schedule() {
        let now = ymd(2024, 6, 15);
        let schedule = build_schedule(&monthly_debt(), Money::from_major(120), now);

        assert_eq!(schedule.len(), 12);
        assert!(!schedule.is_truncated());

        for installment in &schedule {
            assert_eq!(installment.principal_for_period, Money::from_major(100));
            assert_eq!(installment.interest_for_period, Money::from_major(10));
            assert_eq!(installment.installment_amount, Money::from_major(110));

            let expected = if installment.date <= now {
                InstallmentStatus::Due
            } else {
                InstallmentStatus::Upcoming
            };
            assert_eq!(installment.status, expected);
        }

        assert_eq!(schedule.installments[0].date, ymd(2024, 2, 1));
        assert_eq!(schedule.installments[11].date, ymd(2025, 1, 1));
        assert_eq!(schedule.count_by_status(InstallmentStatus::Due), 5);

        let june = &schedule.installments[5];
        assert_eq!(june.cumulative_principal_paid, Money::from_major(600));
        assert_eq!(june.cumulative_interest_paid, Money::from_major(60));
        assert_eq!(june.remaining_principal, Money::from_major(600));
    }

    #[test]
    fn test_missing_inputs_yield_empty() {
        let now = ymd(2024, 6, 15);

        let mut no_due = monthly_debt();
        no_due.due_date = None;
        assert!(build_schedule(&no_due, Money::ZERO, now).is_empty());

        let mut no_frequency = monthly_debt();
        no_frequency.frequency = None;
        assert!(build_schedule(&no_frequency, Money::ZERO, now).is_empty());

        let mut no_duration = monthly_debt();
        no_duration.duration = None;
        assert!(build_schedule(&no_duration, Money::ZERO, now).is_empty());

        let mut no_start = monthly_debt();
        no_start.created_at = None;
        assert!(build_schedule(&no_start, Money::ZERO, now).is_empty());

        let zero = monthly_debt().with_installments("0", DurationUnit::Monthly);
        let schedule = build_schedule(&zero, Money::from_major(120), now);
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_principal, Money::from_major(1200));
        assert_eq!(schedule.total_interest, Money::from_major(120));
    }

    #[test]
    fn test_truncates_past_due_date() {
        // 12 monthly installments cannot fit before mid june
        let debt = monthly_debt().with_due_date(ymd(2024, 6, 15));
        let schedule = build_schedule(&debt, Money::ZERO, ymd(2024, 1, 1));

        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule.requested_installments, 12);
        assert!(schedule.is_truncated());
        assert_eq!(schedule.last().unwrap().remaining_principal, Money::from_major(700));
    }

    #[test]
    fn test_huge_frequency_stops_at_due_date() {
        let debt = Debt::from_json(
            r#"{"amount":"1000","createdAt":"2024-01-01","dueDate":"2024-01-10","frequency":"4000000000","duration":"daily"}"#,
        )
        .unwrap();
        let schedule = build_schedule(&debt, Money::ZERO, ymd(2024, 1, 1));

        // nine days plus the grace day
        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule.requested_installments, 4_000_000_000);
        assert!(schedule.is_truncated());
        assert!(!schedule.final_settled);
        assert_eq!(schedule.last().unwrap().date, ymd(2024, 1, 11));
    }

    #[test]
    fn test_strict_config_drops_grace_day() {
        let strict = ScheduleBuilder::new(ScheduleConfig::strict());
        let schedule = strict.build(&monthly_debt(), Money::ZERO, ymd(2024, 1, 1));

        // the 2025-01-01 installment now overruns 2024-12-31
        assert_eq!(schedule.len(), 11);
    }

    #[test]
    fn test_interest_free_schedule() {
        let schedule = build_schedule(&monthly_debt(), Money::ZERO, ymd(2024, 1, 1));
        for installment in &schedule {
            assert_eq!(installment.interest_for_period, Money::ZERO);
            assert_eq!(installment.cumulative_interest_paid, Money::ZERO);
            assert_eq!(installment.installment_amount, Money::from_major(100));
        }
    }

    #[test]
    fn test_final_installment_clears_residue() {
        let debt = Debt::new(Money::from_major(1000), ymd(2024, 1, 1))
            .with_due_date(ymd(2024, 4, 1))
            .with_installments("3", DurationUnit::Monthly);

        let settled = build_schedule(&debt, Money::from_major(100), ymd(2024, 1, 1));
        let last = settled.last().unwrap();
        assert_eq!(last.remaining_principal, Money::ZERO);
        assert_eq!(last.cumulative_principal_paid, Money::from_major(1000));
        assert_eq!(last.cumulative_interest_paid, Money::from_major(100));
        assert_eq!(last.principal_for_period.as_decimal(), dec!(333.33333333));

        let raw = ScheduleBuilder::new(ScheduleConfig::unadjusted())
            .build(&debt, Money::from_major(100), ymd(2024, 1, 1));
        assert_eq!(raw.last().unwrap().remaining_principal.as_decimal(), dec!(0.00000001));
    }

    #[test]
    fn test_paid_debt_settles_everything() {
        let debt = monthly_debt().with_paid(true);
        let schedule = build_schedule(&debt, Money::from_major(120), ymd(2024, 6, 15));

        assert_eq!(schedule.count_by_status(InstallmentStatus::Settled), 12);
        assert_eq!(schedule.last().unwrap().remaining_principal, Money::ZERO);
    }

    #[test]
    fn test_negative_interest_treated_as_zero() {
        let schedule = build_schedule(&monthly_debt(), Money::from_major(-50), ymd(2024, 1, 1));
        assert_eq!(schedule.total_interest, Money::ZERO);
        assert_eq!(schedule.installments[0].interest_for_period, Money::ZERO);
    }

    #[test]
    fn test_custom_unit_slices_range() {
        let debt = Debt::new(Money::from_major(400), ymd(2024, 1, 1))
            .with_due_date(ymd(2024, 1, 11))
            .with_installments("4", DurationUnit::from("biweekly-ish"));
        let schedule = build_schedule(&debt, Money::ZERO, ymd(2024, 1, 1));

        let dates: Vec<_> = schedule.iter().map(|i| i.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2024, 1, 4), ymd(2024, 1, 6), ymd(2024, 1, 9), ymd(2024, 1, 11)]
        );
    }
}
