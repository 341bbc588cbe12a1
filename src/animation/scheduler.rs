// src/animation/scheduler.rs
//
// A single-threaded timer queue. The owner polls it from the frame loop;
// nothing fires on its own. Dropping the scheduler drops every pending
// timer with it, so a timer can never outlive the component that set it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct ScheduledTimer<E> {
    due: f32,
    seq: u64,
    event: E,
}

// BinaryHeap is a max-heap: invert so the earliest timer is on top.
// Ties go to the timer that was scheduled first.
impl<E> Ord for ScheduledTimer<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<E> PartialOrd for ScheduledTimer<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> PartialEq for ScheduledTimer<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for ScheduledTimer<E> {}

#[derive(Debug)]
pub struct Scheduler<E> {
    pending: BinaryHeap<ScheduledTimer<E>>,
    next_seq: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            pending: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule_at(&mut self, due: f32, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledTimer { due, seq, event });
    }

    /// Drops every pending timer whose event matches.
    pub fn cancel_where<F>(&mut self, mut matches: F) -> usize
    where
        F: FnMut(&E) -> bool,
    {
        let before = self.pending.len();
        self.pending.retain(|timer| !matches(&timer.event));
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns the earliest timer due at or before `now`,
    /// together with its due time.
    pub fn pop_due(&mut self, now: f32) -> Option<(f32, E)> {
        if self.pending.peek()?.due > now {
            return None;
        }
        self.pending.pop().map(|timer| (timer.due, timer.event))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(2.0, "b");
        scheduler.schedule_at(1.0, "a");
        scheduler.schedule_at(3.0, "c");
        scheduler.schedule_at(1.0, "a2");

        assert_eq!(scheduler.pop_due(0.5), None);
        assert_eq!(scheduler.pop_due(2.5), Some((1.0, "a")));
        assert_eq!(scheduler.pop_due(2.5), Some((1.0, "a2")));
        assert_eq!(scheduler.pop_due(2.5), Some((2.0, "b")));
        assert_eq!(scheduler.pop_due(2.5), None);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pop_due(3.0), Some((3.0, "c")));
    }

    #[test]
    fn test_cancelled_timers_never_fire() {
        let mut scheduler = Scheduler::new();
        for n in 1..=4 {
            scheduler.schedule_at(1.0, n);
        }

        assert_eq!(scheduler.cancel_where(|n| *n > 2), 2);
        assert_eq!(scheduler.cancel_where(|n| *n == 2), 1);
        assert_eq!(scheduler.cancel_where(|n| *n == 2), 0);

        assert_eq!(scheduler.pop_due(10.0), Some((1.0, 1)));
        assert_eq!(scheduler.pop_due(10.0), None);
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        for i in 0..10 {
            scheduler.schedule_at(i as f32, i);
        }
        scheduler.cancel_all();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.pop_due(f32::MAX), None);
    }
}
