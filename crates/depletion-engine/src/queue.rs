//! FIFO queue of active occurrences of one recurrence class.

use std::collections::VecDeque;

use chrono::NaiveDate;

use crate::occurrence::OccurrenceNode;

/// Owned FIFO of occurrence nodes, head first.
///
/// The queue never sorts. It stays in non-decreasing `next_date` order because
/// nodes of one recurrence class are consumed in date order and re-enqueued
/// after advancing by the same fixed step.
#[derive(Debug, Default)]
pub struct OccurrenceQueue {
    nodes: VecDeque<OccurrenceNode>,
}

impl OccurrenceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` at the tail.
    pub fn enqueue(&mut self, node: OccurrenceNode) {
        debug_assert!(
            self.nodes
                .back()
                .is_none_or(|tail| tail.next_date() <= node.next_date()),
            "enqueued node dated {} before queue tail",
            node.next_date()
        );
        self.nodes.push_back(node);
    }

    /// Remove and return the head.
    ///
    /// # Panics
    /// Panics if the queue is empty. Callers check [`OccurrenceQueue::is_empty`] first.
    pub fn dequeue(&mut self) -> OccurrenceNode {
        match self.nodes.pop_front() {
            Some(node) => node,
            None => panic!("dequeue on an empty occurrence queue"),
        }
    }

    /// Date of the head without removing it.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn peek_date(&self) -> NaiveDate {
        match self.nodes.front() {
            Some(node) => node.next_date(),
            None => panic!("peek_date on an empty occurrence queue"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
