//! Cache Store Module
//!
//! The unlocked key to entry map. `TtlCache` wraps it in a mutex and shares
//! it with the sweep task; nothing here knows about locking or timers.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to entry storage with hit/miss accounting.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Diagnostics counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores `value` under `key`, stamped with the current time.
    ///
    /// An existing entry for the key is replaced entirely, value and
    /// creation time both.
    pub fn insert(&mut self, key: String, value: Bytes) {
        self.insert_at(key, value, Instant::now());
    }

    /// Stores `value` under `key` with an explicit creation time.
    pub fn insert_at(&mut self, key: String, value: Bytes, created_at: Instant) {
        self.entries
            .insert(key, CacheEntry::created_at(value, created_at));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value stored under `key`, if any.
    ///
    /// Staleness is not checked here; an entry stays visible until a sweep
    /// removes it. The entry's creation time is left untouched.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the full entry for `key` without counting a lookup.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Remove Stale ==
    /// Removes every entry older than `max_age` as of `now`.
    ///
    /// This is a full pass over the store. Returns the number removed.
    pub fn remove_stale(&mut self, max_age: Duration, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale(max_age, now));
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(value: &'static str) -> Bytes {
        Bytes::from_static(value.as_bytes())
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = CacheStore::new();

        store.insert("area:1".to_string(), bytes("loc-data"));

        assert_eq!(store.get("area:1"), Some(bytes("loc-data")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_empty_key_and_value() {
        let mut store = CacheStore::new();

        store.insert(String::new(), Bytes::new());

        assert_eq!(store.get(""), Some(Bytes::new()));
    }

    #[test]
    fn test_store_overwrite_replaces_value_and_timestamp() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.insert_at("x".to_string(), bytes("1"), start);
        store.insert_at("x".to_string(), bytes("2"), start + Duration::from_millis(10));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("x"), Some(bytes("2")));
        assert_eq!(
            store.peek("x").map(|entry| entry.created_at),
            Some(start + Duration::from_millis(10))
        );
    }

    #[test]
    fn test_store_get_does_not_refresh() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.insert_at("k".to_string(), bytes("v"), start);
        for _ in 0..5 {
            store.get("k");
        }

        assert_eq!(store.peek("k").map(|entry| entry.created_at), Some(start));
    }

    #[test]
    fn test_store_remove_stale() {
        let mut store = CacheStore::new();
        let start = Instant::now();
        let max_age = Duration::from_millis(100);

        store.insert_at("old".to_string(), bytes("a"), start);
        store.insert_at("edge".to_string(), bytes("b"), start + Duration::from_millis(50));
        store.insert_at("new".to_string(), bytes("c"), start + Duration::from_millis(120));

        let removed = store.remove_stale(max_age, start + Duration::from_millis(150));

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 2);
        assert!(store.peek("old").is_none());
        assert!(store.peek("edge").is_some(), "age == max_age is not stale");
        assert!(store.peek("new").is_some());
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();
        let start = Instant::now();

        store.insert_at("key1".to_string(), bytes("value1"), start);
        store.get("key1");
        store.get("nonexistent");
        store.remove_stale(Duration::from_millis(1), start + Duration::from_secs(1));

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.total_entries, 0);
    }
}
