//! Uses whose first occurrence has not been materialized yet.

use chrono::NaiveDate;

use crate::occurrence::{first_occurrence, OccurrenceNode};
use crate::recurring::RecurringUse;

/// Drop expired uses and order the rest for popping from the back.
///
/// Uses whose `end_date` is on or before `today` are removed, as are uses whose
/// first occurrence falls past the last representable date. The remainder is
/// sorted descending by first occurrence date, then by start date, so the last
/// element is the use that occurs soonest. The sort is stable: among fully tied
/// uses the one given last ends up on top, and normalizing an already
/// normalized sequence returns it unchanged.
pub fn normalize_uses(uses: &[RecurringUse], today: NaiveDate) -> Vec<RecurringUse> {
    let mut pending: Vec<(NaiveDate, RecurringUse)> = uses
        .iter()
        .filter(|use_| !use_.is_expired(today))
        .filter_map(|use_| first_occurrence(use_, today).map(|first| (first, *use_)))
        .collect();

    pending.sort_by(|(first_a, a), (first_b, b)| {
        (*first_b, b.start_date()).cmp(&(*first_a, a.start_date()))
    });

    pending.into_iter().map(|(_, use_)| use_).collect()
}

/// The pending-start stack. Only shrinks.
#[derive(Debug)]
pub struct PendingStack {
    uses: Vec<RecurringUse>,
    today: NaiveDate,
}

impl PendingStack {
    pub fn new(uses: &[RecurringUse], today: NaiveDate) -> Self {
        Self {
            uses: normalize_uses(uses, today),
            today,
        }
    }

    /// First occurrence date of the top use, if any.
    pub fn peek_date(&self) -> Option<NaiveDate> {
        self.uses
            .last()
            .and_then(|use_| first_occurrence(use_, self.today))
    }

    /// Pop the top use and materialize it into a node.
    pub fn pop(&mut self) -> Option<OccurrenceNode> {
        self.uses
            .pop()
            .and_then(|use_| OccurrenceNode::new(use_, self.today))
    }

    pub fn is_empty(&self) -> bool {
        self.uses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.uses.len()
    }

    /// Remaining uses, top of the stack last.
    pub fn as_slice(&self) -> &[RecurringUse] {
        &self.uses
    }
}
