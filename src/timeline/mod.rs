pub mod navigator;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::breakdown::{compute_breakdown, Breakdown};
use crate::config::ScheduleConfig;
use crate::debt::Debt;
use crate::decimal::Money;
use crate::errors::Result;
use crate::interest::{clamp_interest, resolve_total_interest, InterestSource};
use crate::schedule::{Installment, Schedule, ScheduleBuilder};

pub use navigator::{compute_default_index, TimelineNavigator};

/// a debt with its derived schedule and current timeline selection
///
/// Every input change rebuilds the schedule and resets the selection to its
/// default. `now` is sampled once per rebuild and reused for the breakdown.
#[derive(Debug, Clone)]
pub struct DebtTimeline {
    debt: Debt,
    total_interest: Money,
    builder: ScheduleBuilder,
    schedule: Schedule,
    navigator: TimelineNavigator,
    as_of: DateTime<Utc>,
}

impl DebtTimeline {
    pub fn new(debt: Debt, total_interest: Money, now: DateTime<Utc>) -> Self {
        Self::build(debt, total_interest, ScheduleBuilder::default(), now)
    }

    /// timeline with custom schedule settings
    pub fn with_config(
        debt: Debt,
        total_interest: Money,
        config: ScheduleConfig,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(debt, total_interest, ScheduleBuilder::new(config), now))
    }

    /// timeline whose `now` comes from a time provider
    pub fn with_time(debt: Debt, total_interest: Money, time: &SafeTimeProvider) -> Self {
        Self::new(debt, total_interest, time.now())
    }

    /// resolve interest through a source, degrading to an interest-free schedule on failure
    pub fn from_source(debt: Debt, source: &dyn InterestSource, now: DateTime<Utc>) -> Self {
        let total_interest = match resolve_total_interest(&debt, source) {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(error = %e, "total interest unavailable, using zero");
                Money::ZERO
            }
        };
        Self::new(debt, total_interest, now)
    }

    fn build(debt: Debt, total_interest: Money, builder: ScheduleBuilder, now: DateTime<Utc>) -> Self {
        let total_interest = clamp_interest(total_interest);
        let schedule = builder.build(&debt, total_interest, now);
        let navigator = TimelineNavigator::new(&schedule, &debt);
        Self {
            debt,
            total_interest,
            builder,
            schedule,
            navigator,
            as_of: now,
        }
    }

    /// rebuild for a new `now`
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.as_of = now;
        self.schedule = self.builder.build(&self.debt, self.total_interest, now);
        self.navigator.reset(&self.schedule, &self.debt);
    }

    pub fn refresh_with_time(&mut self, time: &SafeTimeProvider) {
        self.refresh(time.now());
    }

    pub fn set_debt(&mut self, debt: Debt, now: DateTime<Utc>) {
        self.debt = debt;
        self.refresh(now);
    }

    pub fn set_total_interest(&mut self, total_interest: Money, now: DateTime<Utc>) {
        self.total_interest = clamp_interest(total_interest);
        self.refresh(now);
    }

    pub fn set_paid(&mut self, is_paid: bool, now: DateTime<Utc>) {
        self.debt.is_paid = is_paid;
        self.refresh(now);
    }

    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.navigator.select(index)
    }

    pub fn advance(&mut self) -> Option<usize> {
        self.navigator.advance()
    }

    pub fn retreat(&mut self) -> Option<usize> {
        self.navigator.retreat()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.navigator.selected()
    }

    pub fn selected_installment(&self) -> Option<&Installment> {
        self.navigator.selected().and_then(|idx| self.schedule.get(idx))
    }

    /// breakdown at the current selection
    pub fn breakdown(&self) -> Breakdown {
        compute_breakdown(
            &self.schedule,
            self.navigator.selected(),
            &self.debt,
            self.total_interest,
            self.as_of,
        )
    }

    pub fn debt(&self) -> &Debt {
        &self.debt
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn navigator(&self) -> &TimelineNavigator {
        &self.navigator
    }

    pub fn total_interest(&self) -> Money {
        self.total_interest
    }

    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DebtError;
    use crate::interest::{FixedInterest, InterestRequest};
    use crate::types::{DurationUnit, InstallmentStatus};
    use chrono::{Duration, TimeZone};
    use hourglass_rs::TimeSource;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn debt() -> Debt {
        Debt::new(Money::from_major(1200), ymd(2024, 1, 1))
            .with_due_date(ymd(2024, 12, 31))
            .with_installments("12", DurationUnit::Monthly)
    }

    struct Offline;

    impl InterestSource for Offline {
        fn total_interest(&self, _request: &InterestRequest) -> Result<Money> {
            Err(DebtError::InterestUnavailable {
                message: "offline".to_string(),
            })
        }
    }

    #[test]
    fn test_initial_selection_and_breakdown() {
        let timeline = DebtTimeline::new(debt(), Money::from_major(120), ymd(2024, 6, 15));

        assert_eq!(timeline.selected_index(), Some(5));
        let breakdown = timeline.breakdown();
        assert_eq!(breakdown.principal_paid, Money::from_major(600));
        assert_eq!(breakdown.interest_paid, Money::from_major(60));
        assert_eq!(breakdown.total_payable, Money::from_major(1320));
    }

    #[test]
    fn test_navigation_drives_breakdown() {
        let mut timeline = DebtTimeline::new(debt(), Money::from_major(120), ymd(2024, 6, 15));

        timeline.select(0);
        assert_eq!(timeline.breakdown().principal_paid, Money::from_major(100));

        timeline.advance();
        assert_eq!(timeline.selected_installment().unwrap().number, 2);
        assert_eq!(timeline.breakdown().remaining_principal, Money::from_major(1000));

        timeline.retreat();
        timeline.retreat();
        assert_eq!(timeline.selected_index(), Some(0));
    }

    #[test]
    fn test_marking_paid_resets_to_last() {
        let mut timeline = DebtTimeline::new(debt(), Money::from_major(120), ymd(2024, 6, 15));
        timeline.select(2);

        timeline.set_paid(true, ymd(2024, 6, 15));

        assert_eq!(timeline.selected_index(), Some(11));
        assert_eq!(timeline.schedule().count_by_status(InstallmentStatus::Settled), 12);
        assert_eq!(timeline.breakdown().remaining_principal, Money::ZERO);
    }

    #[test]
    fn test_interest_change_rebuilds() {
        let mut timeline = DebtTimeline::new(debt(), Money::ZERO, ymd(2024, 6, 15));
        timeline.set_total_interest(Money::from_major(240), ymd(2024, 6, 15));

        assert_eq!(timeline.schedule().installment_amount(), Some(Money::from_major(120)));
        assert_eq!(timeline.breakdown().total_payable, Money::from_major(1440));
    }

    #[test]
    fn test_source_failure_degrades_to_zero_interest() {
        let timeline = DebtTimeline::from_source(debt(), &Offline, ymd(2024, 6, 15));
        assert_eq!(timeline.total_interest(), Money::ZERO);
        assert_eq!(timeline.schedule().len(), 12);

        let timeline = DebtTimeline::from_source(debt(), &FixedInterest(Money::from_major(120)), ymd(2024, 6, 15));
        assert_eq!(timeline.total_interest(), Money::from_major(120));
    }

    #[test]
    fn test_time_provider_refresh() {
        let time = SafeTimeProvider::new(TimeSource::Test(ymd(2024, 6, 15)));
        let control = time.test_control().unwrap();

        let mut timeline = DebtTimeline::with_time(debt(), Money::from_major(120), &time);
        assert_eq!(timeline.selected_index(), Some(5));

        control.advance(Duration::days(60));
        timeline.refresh_with_time(&time);

        assert_eq!(timeline.as_of(), ymd(2024, 8, 14));
        assert_eq!(timeline.selected_index(), Some(7));
    }

    #[test]
    fn test_empty_timeline_falls_back() {
        let debt = debt().with_installments("abc", DurationUnit::Monthly);
        let mut timeline = DebtTimeline::new(debt, Money::from_major(120), ymd(2024, 6, 15));

        assert_eq!(timeline.selected_index(), None);
        assert_eq!(timeline.select(4), None);
        let breakdown = timeline.breakdown();
        assert_eq!(breakdown.remaining_principal, Money::from_major(1200));
        assert_eq!(breakdown.status_as_of_date, ymd(2024, 12, 31));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScheduleConfig {
            due_date_grace_days: -1,
            ..ScheduleConfig::default()
        };
        assert!(DebtTimeline::with_config(debt(), Money::ZERO, config, ymd(2024, 6, 15)).is_err());
    }
}
