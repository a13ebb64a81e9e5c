//! Cooperative timer queue for deferred table steps.
//!
//! Every task carries the hand generation it was queued for. The owner
//! compares it with the live generation when the task comes due and drops
//! it if the hand has been replaced.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;
use tracing::trace;

/// Work that runs later on the table's own thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Step {
    /// Ask the policy seat for its action.
    OpponentTurn,
    /// Deal the next street or settle the showdown.
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub due: Instant,
    pub generation: u64,
    pub step: Step,
    seq: u64,
}

// Min-heap on (due, seq): earliest first, then insertion order.
impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        other.due.cmp(&self.due).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Task>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, generation: u64, step: Step) {
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(generation, step = ?step, seq, "step scheduled");
        self.queue.push(Task { due, generation, step, seq });
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Task> {
        if self.queue.peek()?.due > now {
            return None;
        }
        self.queue.pop()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.peek().map(|t| t.due)
    }

    /// Drop every pending task; returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.queue.len();
        self.queue.clear();
        if n > 0 {
            trace!(cancelled = n, "pending steps cancelled");
        }
        n
    }

    /// Drop tasks queued for any generation other than `live`.
    pub fn cancel_stale(&mut self, live: u64) -> usize {
        let before = self.queue.len();
        self.queue.retain(|t| t.generation == live);
        before - self.queue.len()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
