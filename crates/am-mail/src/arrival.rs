//! `ArrivalQueue`: mail waiting to show up in the mailroom.
//!
//! Mail is produced up front (generated or loaded) and released into the
//! pool on its arrival tick.  Most ticks see no arrivals, so the queue is a
//! sparse `BTreeMap` keyed by tick and the driver only pays for ticks that
//! actually have mail.

use std::collections::BTreeMap;

use am_core::Tick;

use crate::MailItem;

/// A map from arrival tick to the items arriving at that tick.
#[derive(Default, Debug)]
pub struct ArrivalQueue {
    inner: BTreeMap<Tick, Vec<MailItem>>,
    /// Cached total item count for O(1) `len()`.
    total: usize,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every item at its own arrival tick.
    pub fn from_items(items: impl IntoIterator<Item = MailItem>) -> Self {
        let mut queue = Self::new();
        for item in items {
            queue.push(item);
        }
        queue
    }

    /// Queue `item` for release at `item.arrival()`.
    ///
    /// Items sharing a tick are released in insertion order.
    pub fn push(&mut self, item: MailItem) {
        self.inner.entry(item.arrival()).or_default().push(item);
        self.total += 1;
    }

    /// Remove and return everything arriving at exactly `tick`.
    ///
    /// Returns `None` when nothing arrives at that tick.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<MailItem>> {
        let items = self.inner.remove(&tick)?;
        self.total -= items.len();
        Some(items)
    }

    /// The earliest tick with queued mail, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// All queued items, earliest arrival first.
    pub fn iter(&self) -> impl Iterator<Item = &MailItem> {
        self.inner.values().flatten()
    }

    /// Total number of queued items across all future ticks.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
