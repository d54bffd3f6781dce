//! Occurrence nodes -- a recurring use paired with the date it next occurs.

use chrono::{Duration, NaiveDate};

use crate::recurring::{Periodicity, RecurringUse};

/// Date of the first occurrence of `use_` on or after `today`.
///
/// A use starting today or later first occurs on its start date. A daily use
/// that started in the past occurs today; a weekly one occurs on the first
/// `start_date + 7k` that is not before `today`. Returns `None` when that date
/// is past the last representable calendar date.
pub fn first_occurrence(use_: &RecurringUse, today: NaiveDate) -> Option<NaiveDate> {
    let start = use_.start_date();
    if start >= today {
        return Some(start);
    }
    match use_.periodicity() {
        Periodicity::Daily => Some(today),
        Periodicity::Weekly => {
            let elapsed = (today - start).num_days();
            let weeks = (elapsed + 6) / 7;
            start.checked_add_signed(Duration::days(weeks * 7))
        }
    }
}

/// A materialized recurring use moving between the pending stack and the
/// recurrence queues.
///
/// `next_date` is computed once at creation and afterwards only moved forward
/// by [`OccurrenceNode::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceNode {
    use_: RecurringUse,
    next_date: NaiveDate,
}

impl OccurrenceNode {
    /// Materialize `use_`, or `None` if it has no representable occurrence.
    pub fn new(use_: RecurringUse, today: NaiveDate) -> Option<Self> {
        let next_date = first_occurrence(&use_, today)?;
        Some(Self { use_, next_date })
    }

    pub fn recurring_use(&self) -> &RecurringUse {
        &self.use_
    }

    pub fn next_date(&self) -> NaiveDate {
        self.next_date
    }

    pub fn periodicity(&self) -> Periodicity {
        self.use_.periodicity()
    }

    /// Move `next_date` forward by one recurrence step.
    ///
    /// Returns `true` if the use still occurs on the new date, `false` if the
    /// new date reached its end date. A step past the last representable date
    /// also ends the use and leaves `next_date` where it was.
    pub fn advance(&mut self) -> bool {
        let step = Duration::days(self.use_.periodicity().step_days());
        match self.next_date.checked_add_signed(step) {
            Some(next_date) => {
                self.next_date = next_date;
                self.use_.occurs_before_end(next_date)
            }
            None => false,
        }
    }
}
