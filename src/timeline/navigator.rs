use crate::debt::Debt;
use crate::schedule::Schedule;

/// default selection for a schedule
///
/// Paid debts land on the last installment; otherwise the first upcoming one,
/// or the last when nothing is upcoming. Empty schedules select nothing.
pub fn compute_default_index(schedule: &Schedule, debt: &Debt) -> Option<usize> {
    let last = schedule.last_index()?;
    if debt.is_paid {
        return Some(last);
    }
    Some(schedule.first_upcoming().unwrap_or(last))
}

/// selected installment within a schedule
///
/// Holds only the index and the schedule length; the schedule itself stays with
/// the caller and is passed back in on `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineNavigator {
    selected: Option<usize>,
    len: usize,
}

impl TimelineNavigator {
    pub fn new(schedule: &Schedule, debt: &Debt) -> Self {
        let mut navigator = Self::default();
        navigator.reset(schedule, debt);
        navigator
    }

    /// replace the selection with the default for a (re)derived schedule
    pub fn reset(&mut self, schedule: &Schedule, debt: &Debt) {
        self.len = schedule.len();
        self.selected = compute_default_index(schedule, debt);
        tracing::debug!(selected = ?self.selected, len = self.len, "timeline selection reset");
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// select an index, clamped into the schedule
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if self.len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(index.min(self.len - 1));
        }
        self.selected
    }

    /// step one installment forward, stopping at the last
    pub fn advance(&mut self) -> Option<usize> {
        let next = self.selected.map_or(0, |idx| idx.saturating_add(1));
        self.select(next)
    }

    /// step one installment back, stopping at the first
    pub fn retreat(&mut self) -> Option<usize> {
        let prev = self.selected.map_or(0, |idx| idx.saturating_sub(1));
        self.select(prev)
    }

    pub fn is_at_start(&self) -> bool {
        matches!(self.selected, None | Some(0))
    }

    pub fn is_at_end(&self) -> bool {
        match self.selected {
            Some(idx) => idx + 1 >= self.len,
            None => true,
        }
    }
}
