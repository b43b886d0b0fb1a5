use chrono::{DateTime, Duration, Months, Utc};

use crate::types::DurationUnit;

/// date of installment `index` (1-based) out of `count`
///
/// Calendar units step from `start` directly so month-end clamping never
/// accumulates. Any other unit slices the start/due range evenly in whole days.
pub fn installment_date(
    start: DateTime<Utc>,
    due: DateTime<Utc>,
    unit: &DurationUnit,
    index: u32,
    count: u32,
) -> Option<DateTime<Utc>> {
    match unit {
        DurationUnit::Daily => start.checked_add_signed(Duration::days(index as i64)),
        DurationUnit::Weekly => start.checked_add_signed(Duration::weeks(index as i64)),
        DurationUnit::Monthly => start.checked_add_months(Months::new(index)),
        DurationUnit::Yearly => start.checked_add_months(Months::new(index.checked_mul(12)?)),
        DurationUnit::Other(_) => {
            let offset = proportional_offset_days(whole_days_between(start, due), index, count)?;
            start.checked_add_signed(Duration::days(offset))
        }
    }
}

/// whole days from `start` to `end`, truncated toward zero
pub fn whole_days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}

/// round(total_days * index / count) with halves rounded up
fn proportional_offset_days(total_days: i64, index: u32, count: u32) -> Option<i64> {
    if count == 0 {
        return None;
    }
    let numerator = total_days.checked_mul(index as i64)?;
    let denominator = count as i64;
    Some((2 * numerator + denominator).div_euclid(2 * denominator))
}
