//! Cache store holding decoded responses in memory
//!
//! Provides a `CacheStore` that maps string keys to timestamped records.
//! The store is internally synchronized so `get`/`put`/`invalidate` are safe
//! to call from any task without external locking.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A cached value paired with the time it was stored
///
/// The timestamp is the store time supplied by the writer, not the read
/// time. For a given key, timestamps never decrease across replacements
/// because writers always stamp with the current clock.
#[derive(Debug, Clone)]
pub struct CacheRecord<T> {
    /// The cached value
    pub value: T,
    /// When the value was cached
    pub cached_at: DateTime<Utc>,
}

/// In-memory key to record map with interior synchronization
///
/// Holds at most one record per key; a `put` for an existing key replaces
/// the record wholesale. The store never judges freshness itself — callers
/// read `cached_at` and decide. There is no background eviction; stale
/// entries are removed by callers via `invalidate`.
#[derive(Debug, Default)]
pub struct CacheStore<T> {
    records: Mutex<HashMap<String, CacheRecord<T>>>,
}

impl<T: Clone> CacheStore<T> {
    /// Creates an empty cache store
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Stores or overwrites the record for `key`
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the entry (e.g., the request URL)
    /// * `value` - The value to cache
    /// * `now` - Timestamp recorded as the entry's creation time
    pub fn put(&self, key: &str, value: T, now: DateTime<Utc>) {
        self.lock().insert(
            key.to_string(),
            CacheRecord {
                value,
                cached_at: now,
            },
        );
    }

    /// Returns a clone of the record for `key`, or `None` if absent
    pub fn get(&self, key: &str) -> Option<CacheRecord<T>> {
        self.lock().get(key).cloned()
    }

    /// Removes the record for `key`; no-op if absent
    pub fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Number of records currently stored
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock only means another thread panicked mid-operation;
    // the map itself is still structurally valid, so recover the guard.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheRecord<T>>> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
