//! Chronological merge of pending uses and recurrence queues, plus the
//! depletion loop that runs over it.
//!
//! Three sources feed the merge: the pending-start stack (uses not yet
//! materialized, earliest on top) and one FIFO queue per recurrence class.
//! Each step takes whichever source occurs soonest, so the stream of
//! occurrence dates never goes backwards. A consumed node is advanced by its
//! recurrence step and re-enqueued until it reaches its end date.

use std::iter::FusedIterator;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::occurrence::OccurrenceNode;
use crate::pending::PendingStack;
use crate::queue::OccurrenceQueue;
use crate::recurring::{Periodicity, RecurringUse};

/// One concrete consumption date of a recurring use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub recurring_use: RecurringUse,
}

/// Pick the queue whose head occurs first.
///
/// An empty queue loses unconditionally. On equal head dates the daily queue
/// wins.
pub fn next_queue<'q>(
    daily: &'q mut OccurrenceQueue,
    weekly: &'q mut OccurrenceQueue,
) -> &'q mut OccurrenceQueue {
    if daily.is_empty() {
        return weekly;
    }
    if weekly.is_empty() {
        return daily;
    }
    if daily.peek_date() <= weekly.peek_date() {
        daily
    } else {
        weekly
    }
}

/// Take the chronologically next occurrence from the three sources.
///
/// The pending stack wins whenever the chosen queue head is not strictly
/// earlier than the first occurrence of the top pending use. Returns `None`
/// only when every source is empty.
pub fn next_occurrence(
    daily: &mut OccurrenceQueue,
    weekly: &mut OccurrenceQueue,
    pending: &mut PendingStack,
) -> Option<OccurrenceNode> {
    if daily.is_empty() && weekly.is_empty() {
        return pending.pop();
    }

    let queue = next_queue(daily, weekly);
    match pending.peek_date() {
        Some(pending_date) if queue.peek_date() >= pending_date => pending.pop(),
        _ => Some(queue.dequeue()),
    }
}

/// Advance a consumed node by one step and put it back in its class's queue,
/// or drop it if the new date reached the use's end date.
pub fn reschedule(
    mut node: OccurrenceNode,
    daily: &mut OccurrenceQueue,
    weekly: &mut OccurrenceQueue,
) {
    let queue = match node.periodicity() {
        Periodicity::Daily => daily,
        Periodicity::Weekly => weekly,
    };
    if node.advance() {
        queue.enqueue(node);
    }
}

/// Iterator over every occurrence of a set of uses, in date order.
///
/// Unbounded uses make the stream infinite.
#[derive(Debug)]
pub struct Occurrences {
    pending: PendingStack,
    daily: OccurrenceQueue,
    weekly: OccurrenceQueue,
}

impl Occurrences {
    pub fn new(uses: &[RecurringUse], today: NaiveDate) -> Self {
        Self {
            pending: PendingStack::new(uses, today),
            daily: OccurrenceQueue::new(),
            weekly: OccurrenceQueue::new(),
        }
    }

    /// Number of uses not yet materialized.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Iterator for Occurrences {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        let node = next_occurrence(&mut self.daily, &mut self.weekly, &mut self.pending)?;
        let occurrence = Occurrence {
            date: node.next_date(),
            recurring_use: *node.recurring_use(),
        };
        reschedule(node, &mut self.daily, &mut self.weekly);
        Some(occurrence)
    }
}

impl FusedIterator for Occurrences {}

/// Depletion state carried across occurrences.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Depletion {
    pub(crate) remaining: i64,
    pub(crate) current_date: NaiveDate,
}

impl Depletion {
    pub(crate) fn new(stock: i64, today: NaiveDate) -> Self {
        Self {
            remaining: stock,
            current_date: today,
        }
    }

    /// Apply one occurrence. Returns the depletion date once the stock runs out.
    ///
    /// Reaching exactly zero depletes on the occurrence's own date. Going
    /// below zero depletes on the date of the previous occurrence, the last
    /// one the stock fully covered.
    pub(crate) fn consume(&mut self, occurrence: &Occurrence) -> Option<NaiveDate> {
        self.remaining = self
            .remaining
            .saturating_sub(occurrence.recurring_use.amount());
        if self.remaining < 0 {
            return Some(self.current_date);
        }
        if self.remaining == 0 {
            return Some(occurrence.date);
        }
        self.current_date = occurrence.date;
        None
    }
}

/// Predict the date `stock` runs out, using `today` as the reference date.
///
/// Returns `None` when the uses stop occurring before the stock is consumed.
pub fn predict_end_date_on(
    today: NaiveDate,
    stock: i64,
    uses: &[RecurringUse],
) -> Option<NaiveDate> {
    let occurrences = Occurrences::new(uses, today);
    tracing::debug!(
        %today,
        stock,
        pending = occurrences.pending_len(),
        "predicting depletion date"
    );

    let mut depletion = Depletion::new(stock, today);
    for occurrence in occurrences {
        tracing::trace!(
            date = %occurrence.date,
            amount = occurrence.recurring_use.amount(),
            remaining = depletion.remaining,
            "consuming occurrence"
        );
        if let Some(date) = depletion.consume(&occurrence) {
            tracing::debug!(%date, "stock depleted");
            return Some(date);
        }
    }

    tracing::debug!(remaining = depletion.remaining, "uses exhausted before stock");
    None
}

/// Predict the date `stock` runs out, reading "today" once from `clock`.
pub fn predict_end_date<C: Clock + ?Sized>(
    clock: &C,
    stock: i64,
    uses: &[RecurringUse],
) -> Option<NaiveDate> {
    predict_end_date_on(clock.today(), stock, uses)
}
