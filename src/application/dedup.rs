//! Bounded FIFO cache of processed killmail ids.
//!
//! This is a near-term duplicate filter, not a durable log. The feed may
//! redeliver, and cooperating consumers may share a queue; the cache only has
//! to suppress repeats inside a bounded window. Once an id falls out of the
//! window it is treated as new.

use std::collections::{HashSet, VecDeque};

use crate::domain::KillmailId;

/// Default window size.
pub const DEFAULT_DEDUP_CAPACITY: usize = 500;

/// Set for membership plus a queue for eviction order.
///
/// Both structures always hold the same ids and the queue never exceeds
/// `capacity`.
#[derive(Debug, Clone)]
pub struct DedupCache {
    seen: HashSet<KillmailId>,
    order: VecDeque<KillmailId>,
    capacity: usize,
}

impl DedupCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    #[must_use]
    pub fn has(&self, id: KillmailId) -> bool {
        self.seen.contains(&id)
    }

    /// Record an id. Marking an id already present leaves its position alone,
    /// so it does not change what gets evicted next.
    pub fn mark(&mut self, id: KillmailId) {
        if !self.seen.insert(id) {
            return;
        }
        self.order.push_back(id);

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DedupCache {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_CAPACITY)
    }
}
