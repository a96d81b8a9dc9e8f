#![forbid(unsafe_code)]

//! Deferred, cancellable removal of deleting items.
//!
//! A double-click arms a removal that fires once the fade-out grace period
//! has passed. The host drives time: [`RemovalScheduler::take_due`] is
//! polled from the session tick rather than run on a timer thread, so a
//! removal never races a render.
//!
//! Each entry records the stage generation it was armed in. A bulk replace
//! or clear cancels everything outstanding; an entry that somehow survives
//! (or an id that vanished for another reason) is detected by the caller
//! via the generation and an existence check, and dropped silently.

use std::collections::BTreeMap;

use web_time::Instant;
use wordfall_core::gesture::ItemId;

/// One armed removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRemoval {
    pub item: ItemId,
    pub due: Instant,
    /// Stage generation at the time the removal was armed.
    pub generation: u64,
}

/// Pending removals keyed by item.
#[derive(Debug, Clone, Default)]
pub struct RemovalScheduler {
    pending: BTreeMap<ItemId, ScheduledRemoval>,
}

impl RemovalScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a removal of `item` at `due`. An item already scheduled keeps
    /// its original deadline; returns `false` in that case.
    pub fn schedule(&mut self, item: ItemId, due: Instant, generation: u64) -> bool {
        if self.pending.contains_key(&item) {
            return false;
        }
        self.pending.insert(
            item,
            ScheduledRemoval {
                item,
                due,
                generation,
            },
        );
        true
    }

    /// Disarm the removal of `item`. Returns whether one was pending.
    pub fn cancel(&mut self, item: ItemId) -> bool {
        self.pending.remove(&item).is_some()
    }

    /// Disarm every pending removal. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Remove and return every entry due at or before `now`, earliest
    /// first (ties by item id).
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledRemoval> {
        let due: Vec<ItemId> = self
            .pending
            .values()
            .filter(|entry| entry.due <= now)
            .map(|entry| entry.item)
            .collect();
        let mut out: Vec<ScheduledRemoval> = due
            .into_iter()
            .filter_map(|item| self.pending.remove(&item))
            .collect();
        out.sort_by_key(|entry| (entry.due, entry.item));
        out
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|entry| entry.due).min()
    }

    #[inline]
    #[must_use]
    pub fn is_scheduled(&self, item: ItemId) -> bool {
        self.pending.contains_key(&item)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
