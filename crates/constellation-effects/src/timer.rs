//! Cancellable one-shot alarms
//!
//! Time is an explicit [`Duration`] since any origin the owner picks (usually
//! the moment the page came up), which keeps every effect deterministic under test.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`], used to cancel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Pending events ordered by deadline, ties broken by scheduling order
#[derive(Debug)]
pub struct TimerQueue<E> {
    pending: BTreeMap<(Duration, TimerId), E>,
    deadlines: HashMap<TimerId, Duration>,
    next_id: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once `delay` has elapsed after `now`
    pub fn schedule(&mut self, now: Duration, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let deadline = now.saturating_add(delay);
        self.pending.insert((deadline, id), event);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Returns false when the timer already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.pending.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
        self.deadlines.clear();
    }

    /// Remove and return every event whose deadline is at or before `now`
    pub fn poll(&mut self, now: Duration) -> Vec<E> {
        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            let (deadline, id) = *entry.key();
            if deadline > now {
                break;
            }
            due.push(entry.remove());
            self.deadlines.remove(&id);
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
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

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_poll_returns_due_events_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(0), ms(300), "c");
        timers.schedule(ms(0), ms(100), "a");
        timers.schedule(ms(50), ms(50), "b");

        assert!(timers.poll(ms(99)).is_empty());
        assert_eq!(timers.poll(ms(100)), vec!["a", "b"]);
        assert_eq!(timers.next_deadline(), Some(ms(300)));
        assert_eq!(timers.poll(ms(1000)), vec!["c"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let keep = timers.schedule(ms(0), ms(10), 1);
        let drop = timers.schedule(ms(0), ms(10), 2);

        assert!(timers.cancel(drop));
        assert!(!timers.cancel(drop));
        assert!(timers.is_scheduled(keep));
        assert_eq!(timers.poll(ms(20)), vec![1]);
        assert!(!timers.cancel(keep));
    }

    #[test]
    fn test_cancel_all_clears_everything() {
        let mut timers = TimerQueue::new();
        for i in 0..5 {
            timers.schedule(ms(0), ms(i * 10), i);
        }
        timers.cancel_all();
        assert_eq!(timers.len(), 0);
        assert!(timers.poll(ms(1000)).is_empty());
        assert_eq!(timers.next_deadline(), None);
    }
}
