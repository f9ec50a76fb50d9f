//! In-memory caches for previous closes and ranked snapshots.
//!
//! Both caches are shared process-wide. Reads and writes are point-in-time:
//! nothing holds a lock across a network call, so concurrent writers to the
//! same key race and the last write wins.

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use dashmap::DashMap;

use crate::ranking::Snapshot;

/// A previous close and the calendar day it was computed on.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviousCloseEntry {
    pub symbol: String,
    pub close: f64,
    pub day: NaiveDate,
}

/// Per-symbol store of the previous session's close.
///
/// An entry is only valid on the day it was stored for. Looking it up on any
/// other day is a miss.
pub trait PrevCloseCache: Send + Sync {
    fn get(&self, symbol: &str, day: NaiveDate) -> Option<f64>;
    fn put(&self, symbol: &str, close: f64, day: NaiveDate);
}

/// Thread-safe previous-close cache backed by `DashMap`.
///
/// One entry per symbol; storing a newer day replaces the older entry.
/// Entries from another day are evicted lazily on lookup.
#[derive(Default)]
pub struct MemoryPrevCloseCache {
    store: DashMap<String, PreviousCloseEntry>,
}

impl MemoryPrevCloseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl PrevCloseCache for MemoryPrevCloseCache {
    fn get(&self, symbol: &str, day: NaiveDate) -> Option<f64> {
        let entry = self.store.get(symbol)?;
        if entry.day != day {
            drop(entry);
            self.store.remove_if(symbol, |_, e| e.day < day);
            return None;
        }
        Some(entry.close)
    }

    fn put(&self, symbol: &str, close: f64, day: NaiveDate) {
        self.store.insert(
            symbol.to_string(),
            PreviousCloseEntry {
                symbol: symbol.to_string(),
                close,
                day,
            },
        );
    }
}

/// Holder of the most recently computed snapshot.
pub trait SnapshotCache: Send + Sync {
    fn get(&self) -> Option<Arc<Snapshot>>;
    fn put(&self, snapshot: Arc<Snapshot>);
}

/// Single-slot snapshot cache. Freshness is judged by the caller.
#[derive(Default)]
pub struct MemorySnapshotCache {
    slot: RwLock<Option<Arc<Snapshot>>>,
}

impl MemorySnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached snapshot.
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl SnapshotCache for MemorySnapshotCache {
    fn get(&self) -> Option<Arc<Snapshot>> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn put(&self, snapshot: Arc<Snapshot>) {
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = Some(snapshot);
    }
}
