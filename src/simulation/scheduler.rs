//! Event-ordered scheduler of pending activity resumptions
//!
//! A binary heap keyed by `(time, rank, insertion sequence)`. At equal times
//! lower ranks come out first, and entries of equal rank come out in the order
//! they were scheduled. A run is therefore deterministic for a given stream of
//! random draws.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One pending resumption
#[derive(Debug)]
struct Pending<E> {
    time: f64,
    rank: u8,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Pending<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Pending<E> {}

impl<E> PartialOrd for Pending<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Pending<E> {
    // Reversed so the max-heap yields the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.rank.cmp(&self.rank))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of events keyed by virtual time
#[derive(Debug)]
pub struct EventScheduler<E> {
    heap: BinaryHeap<Pending<E>>,
    next_seq: u64,
}

impl<E> Default for EventScheduler<E> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }
}

impl<E> EventScheduler<E> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `time` with the lowest rank; returns its insertion sequence number
    pub fn schedule(&mut self, time: f64, event: E) -> u64 {
        self.schedule_ranked(time, 0, event)
    }

    /// Schedule `event` at `time`, ordered by `rank` against events at the same time
    pub fn schedule_ranked(&mut self, time: f64, rank: u8, event: E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Pending { time, rank, seq, event });
        seq
    }

    /// Time of the earliest pending event
    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|pending| pending.time)
    }

    /// Remove and return the earliest pending event
    pub fn pop(&mut self) -> Option<(f64, E)> {
        self.heap.pop().map(|pending| (pending.time, pending.event))
    }

    /// Remove and return the earliest event if it is strictly before `horizon`
    pub fn pop_before(&mut self, horizon: f64) -> Option<(f64, E)> {
        match self.peek_time() {
            Some(time) if time < horizon => self.pop(),
            _ => None,
        }
    }

    /// Remove every remaining event, earliest first
    pub fn drain_ordered(&mut self) -> Vec<(f64, E)> {
        let mut drained = Vec::with_capacity(self.heap.len());
        while let Some(entry) = self.pop() {
            drained.push(entry);
        }
        drained
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of events ever scheduled
    pub fn scheduled_total(&self) -> u64 {
        self.next_seq
    }
}
