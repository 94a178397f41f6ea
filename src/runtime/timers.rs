use crate::foundation::core::Millis;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Handle for a scheduled timeout or interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TimerId(u64);

#[derive(Debug)]
struct TimerEntry<E> {
    event: E,
    due: Millis,
    period: Option<Millis>,
}

/// Cooperative virtual-time timer queue.
///
/// Determinism rule: timers fire in `due` order; timers due at the same instant fire in the order
/// they were (re)scheduled. Cancelled timers are dropped from the live table immediately and their
/// heap entries are skipped lazily.
#[derive(Debug)]
pub(crate) struct TimerQueue<E> {
    now: Millis,
    next_id: u64,
    next_seq: u64,
    heap: BinaryHeap<Reverse<(Millis, u64, TimerId)>>,
    live: HashMap<TimerId, TimerEntry<E>>,
}

impl<E: Clone> TimerQueue<E> {
    pub(crate) fn new() -> Self {
        Self {
            now: Millis::ZERO,
            next_id: 0,
            next_seq: 0,
            heap: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }

    pub(crate) fn now(&self) -> Millis {
        self.now
    }

    /// Number of timers still scheduled.
    pub(crate) fn pending(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn set_timeout(&mut self, delay: Millis, event: E) -> TimerId {
        self.schedule(delay, None, event)
    }

    /// Schedule `event` every `period`, first firing one period from now.
    ///
    /// A zero period is treated as 1ms so an interval can never starve the clock.
    pub(crate) fn set_interval(&mut self, period: Millis, event: E) -> TimerId {
        let period = Millis(period.0.max(1));
        self.schedule(period, Some(period), event)
    }

    /// Cancel a timer. Returns `false` when it already fired (timeouts) or was cancelled.
    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id).is_some()
    }

    pub(crate) fn cancel_all(&mut self) {
        self.live.clear();
        self.heap.clear();
    }

    /// Earliest instant at which a live timer is due.
    pub(crate) fn next_due(&mut self) -> Option<Millis> {
        self.discard_stale();
        self.heap.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Pop the next live timer due at or before `until`, moving the clock to its due instant.
    ///
    /// Intervals are rescheduled before being returned, so a callback may cancel them.
    pub(crate) fn pop_due(&mut self, until: Millis) -> Option<(TimerId, E)> {
        self.discard_stale();
        let Reverse((due, _, id)) = *self.heap.peek()?;
        if due > until {
            return None;
        }
        self.heap.pop();
        self.now = self.now.max(due);

        let (event, period) = {
            let entry = self.live.get(&id)?;
            (entry.event.clone(), entry.period)
        };
        match period {
            Some(period) => {
                let next = due.saturating_add(period);
                if let Some(entry) = self.live.get_mut(&id) {
                    entry.due = next;
                }
                let seq = self.bump_seq();
                self.heap.push(Reverse((next, seq, id)));
            }
            None => {
                self.live.remove(&id);
            }
        }
        Some((id, event))
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub(crate) fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    fn schedule(&mut self, delay: Millis, period: Option<Millis>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay);
        let seq = self.bump_seq();
        self.live.insert(id, TimerEntry { event, due, period });
        self.heap.push(Reverse((due, seq, id)));
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn discard_stale(&mut self) {
        while let Some(&Reverse((due, _, id))) = self.heap.peek() {
            match self.live.get(&id) {
                Some(entry) if entry.due == due => break,
                _ => {
                    self.heap.pop();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
