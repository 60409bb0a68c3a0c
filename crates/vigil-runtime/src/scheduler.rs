//! Deferred wake-ups ordered by due time.
//!
//! Timed effects (typewriter lines, delayed starts) register `(due, key)`
//! pairs instead of each owning a timer.  The frame loop drains whatever is
//! due with [`Scheduler::pop_due`].  Entries with equal due times come back in
//! the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct Entry<K> {
    due: Duration,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<K> Eq for Entry<K> {}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Entry<K> {
    // Reversed: BinaryHeap is a max-heap and we want the earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-queue of keys keyed on their due time.
#[derive(Debug)]
pub struct Scheduler<K> {
    heap: BinaryHeap<Entry<K>>,
    next_seq: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<K> Scheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake `key` at `due`.
    pub fn schedule(&mut self, due: Duration, key: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due, seq, key });
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|e| e.due)
    }

    /// Remove and return the earliest entry if it is due at or before `now`.
    pub fn pop_next_due(&mut self, now: Duration) -> Option<(Duration, K)> {
        if self.next_due()? > now {
            return None;
        }
        self.heap.pop().map(|e| (e.due, e.key))
    }

    /// Remove and return every entry due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: Duration) -> Vec<(Duration, K)> {
        let mut out = Vec::new();
        while let Some(entry) = self.pop_next_due(now) {
            out.push(entry);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
