//! In-memory cache for decoded API responses
//!
//! This module provides a cache store that keeps decoded responses in memory
//! with a creation timestamp per entry. Freshness judgment is left to the
//! caller: the store exposes the raw timestamp and the fetch coordinator
//! applies its own time-window policy.

mod store;

pub use store::{CacheRecord, CacheStore};
