//! `EventQueue` — timestamp-ordered future-event list.
//!
//! `BTreeMap` keyed by `(time, seq)` gives O(log E) insert, pop, and cancel
//! where E is the number of pending events.  The network never has more than
//! `num_servers + 1` pending events (one arrival, one completion per busy
//! server), so E stays tiny.

use std::collections::BTreeMap;

use qn_core::SimTime;

use crate::{Event, EventKey};

/// A priority queue of `(time, seq) → event`.
#[derive(Debug, Default)]
pub struct EventQueue {
    inner:    BTreeMap<EventKey, Event>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `time`.  Returns a key that can cancel it.
    pub fn schedule(&mut self, time: SimTime, event: Event) -> EventKey {
        let key = EventKey { time, seq: self.next_seq };
        self.next_seq += 1;
        self.inner.insert(key, event);
        key
    }

    /// Remove and return the earliest event, ties broken by schedule order.
    pub fn pop(&mut self) -> Option<(SimTime, Event)> {
        self.inner.pop_first().map(|(key, event)| (key.time, event))
    }

    /// Remove a pending event.  Returns `None` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, key: EventKey) -> Option<Event> {
        self.inner.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
