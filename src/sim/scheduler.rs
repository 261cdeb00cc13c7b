//! Delayed task queue
//!
//! Replaces ad-hoc `setTimeout`/`setInterval` handles with one queue keyed by
//! a monotonic millisecond clock. The browser drives it with a single host
//! timer armed for `next_deadline()`; tests drive it by advancing the clock.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Min-heap of deadlines; ties resolve in insertion order
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BinaryHeap<Reverse<(u64, u64)>>,
    tasks: HashMap<u64, (u64, T)>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_id: 0,
        }
    }

    /// Run `task` once the clock reaches `now + delay_ms`
    pub fn schedule(&mut self, now: u64, delay_ms: u64, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let deadline = now.saturating_add(delay_ms);
        self.queue.push(Reverse((deadline, id)));
        self.tasks.insert(id, (deadline, task));
        TimerId(id)
    }

    /// Cancel a pending task. Unknown or already-fired ids are ignored.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        // The heap entry is skipped lazily in `pop_due`
        self.tasks.remove(&id.0).is_some()
    }

    #[cfg(test)]
    fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.contains_key(&id.0)
    }

    /// Pop the earliest task due at or before `now`, with its deadline
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, T)> {
        while let Some(&Reverse((deadline, id))) = self.queue.peek() {
            if deadline > now {
                return None;
            }
            self.queue.pop();
            if let Some((_, task)) = self.tasks.remove(&id) {
                return Some((deadline, task));
            }
        }
        None
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.values().map(|(deadline, _)| *deadline).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
