//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and lazily evaluated TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::cache::{
    CacheApi, CacheEntry, Clock, InsertionOrder, IntoCacheKey, KeyFilter, SystemClock,
};
use crate::error::Result;

// == Entries ==
/// Map and key order, guarded together by the store's mutex.
#[derive(Debug)]
struct Entries<V> {
    map: HashMap<String, CacheEntry<V>>,
    order: InsertionOrder,
}

impl<V> Entries<V> {
    fn new() -> Self {
        Self {
            map: HashMap::new(),
            order: InsertionOrder::new(),
        }
    }
}

// == Cache ==
/// TTL cache storage.
///
/// Expired entries are never removed by time passing alone: `is_valid`
/// interprets TTL, `get` and `keys` do not. Entries leave the store only
/// through `delete`, `clear` or being overwritten by `set`.
///
/// Intended to be created once at startup and shared through an `Arc`.
#[derive(Debug)]
pub struct Cache<V> {
    entries: Mutex<Entries<V>>,
    clock: Arc<dyn Clock>,
}

impl<V> Cache<V> {
    // == Constructor ==
    /// Creates an empty cache reading time from the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(Entries::new()),
            clock,
        }
    }

    // == Length ==
    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.lock().map.is_empty()
    }
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> CacheApi for Cache<V> {
    type Value = V;

    fn has(&self, key: &str) -> bool {
        self.entries.lock().map.contains_key(key)
    }

    // == Set ==
    /// Stores a key-value pair, resetting `cached_at` to now.
    ///
    /// Nothing is modified when validation fails.
    fn set<K: IntoCacheKey>(&self, key: K, value: V, ttl_ms: i64) -> Result<()> {
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl_ms)?;
        let key = key.into_cache_key()?.into_string();

        let mut entries = self.entries.lock();
        if entries.map.insert(key.clone(), entry).is_none() {
            entries.order.push(&key);
        }

        trace!("Cache set: key={} ttl_ms={}", key, ttl_ms);
        Ok(())
    }

    // == Get ==
    /// Returns a clone of the stored value, live or expired.
    fn get(&self, key: &str) -> Option<V> {
        self.entries
            .lock()
            .map
            .get(key)
            .map(|entry| entry.value.clone())
    }

    // == Is Valid ==
    fn is_valid(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .lock()
            .map
            .get(key)
            .is_some_and(|entry| entry.is_live(now))
    }

    // == Delete ==
    fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.lock();
        if entries.map.remove(key).is_some() {
            entries.order.remove(key);
            trace!("Cache delete: key={}", key);
            true
        } else {
            false
        }
    }

    // == Keys ==
    /// The filter runs after the lock is released, so it may call back into
    /// the cache.
    fn keys(&self, filter: Option<KeyFilter<'_>>) -> Vec<String> {
        let keys: Vec<String> = self.entries.lock().order.iter().cloned().collect();
        match filter {
            Some(matches) => keys.into_iter().filter(|key| matches(key)).collect(),
            None => keys,
        }
    }

    // == Clear ==
    fn clear(&self) {
        let mut entries = self.entries.lock();
        let removed = entries.map.len();
        entries.map.clear();
        entries.order.clear();
        trace!("Cache clear: removed {} entries", removed);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::CacheError;

    fn test_cache() -> (Cache<String>, ManualClock) {
        let clock = ManualClock::new(0);
        let cache = Cache::with_clock(Arc::new(clock.clone()));
        (cache, clock)
    }

    #[test]
    fn test_store_new() {
        let cache: Cache<String> = Cache::new();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert!(cache.keys(None).is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let (cache, _) = test_cache();

        cache.set("key1", "value1".to_string(), 1000).unwrap();

        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert!(cache.is_valid("key1"));
        assert!(cache.has("key1"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (cache, _) = test_cache();

        assert_eq!(cache.get("nonexistent"), None);
        assert!(!cache.has("nonexistent"));
        assert!(!cache.is_valid("nonexistent"));
    }

    #[test]
    fn test_store_numeric_key() {
        let (cache, _) = test_cache();

        cache.set(0, "zero".to_string(), 1).unwrap();

        assert_eq!(cache.get("0"), Some("zero".to_string()));
    }

    #[test]
    fn test_store_rejects_invalid_ttl() {
        let (cache, _) = test_cache();

        assert_eq!(
            cache.set("1", "Hello, world?".to_string(), 0),
            Err(CacheError::InvalidTtl(0))
        );
        assert_eq!(
            cache.set("1", "Goodbye, world... :(".to_string(), -1),
            Err(CacheError::InvalidTtl(-1))
        );
        assert!(!cache.has("1"));
    }

    #[test]
    fn test_store_invalid_ttl_keeps_previous_entry() {
        let (cache, _) = test_cache();
        cache.set("1", "original".to_string(), 1000).unwrap();

        assert!(cache.set("1", "replacement".to_string(), 0).is_err());

        assert_eq!(cache.get("1"), Some("original".to_string()));
    }

    #[test]
    fn test_store_rejects_invalid_key() {
        let (cache, _) = test_cache();

        assert!(matches!(
            cache.set("", "value".to_string(), 1),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(
            cache.set(f64::NAN, "value".to_string(), 1),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(
            cache.set(f64::NEG_INFINITY, "value".to_string(), 1),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_overwrite() {
        let (cache, _) = test_cache();

        cache.set("key1", "value1".to_string(), 1000).unwrap();
        cache.set("key1", "value2".to_string(), 1000).unwrap();

        assert_eq!(cache.get("key1"), Some("value2".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_ttl_boundary() {
        let (cache, clock) = test_cache();

        cache.set("1", "1".to_string(), 1000).unwrap();
        assert!(cache.is_valid("1"));

        clock.advance(999);
        assert!(cache.is_valid("1"));

        clock.advance(1);
        assert!(!cache.is_valid("1"));

        clock.advance(1);
        assert!(!cache.is_valid("1"));
    }

    #[test]
    fn test_store_get_ignores_expiry() {
        let (cache, clock) = test_cache();

        cache.set("key1", "stale".to_string(), 10).unwrap();
        clock.advance(10_000);

        assert!(!cache.is_valid("key1"));
        assert!(cache.has("key1"));
        assert_eq!(cache.get("key1"), Some("stale".to_string()));
        assert_eq!(cache.keys(None), vec!["key1".to_string()]);
    }

    #[test]
    fn test_store_overwrite_resets_cached_at() {
        let (cache, clock) = test_cache();

        cache.set("key1", "v1".to_string(), 100).unwrap();
        clock.advance(150);
        assert!(!cache.is_valid("key1"));

        cache.set("key1", "v2".to_string(), 100).unwrap();
        assert!(cache.is_valid("key1"));
    }

    #[test]
    fn test_store_delete() {
        let (cache, _) = test_cache();

        cache.set("key1", "value1".to_string(), 1000).unwrap();

        assert!(cache.delete("key1"));
        assert!(!cache.delete("key1"));
        assert!(cache.is_empty());
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let (cache, _) = test_cache();
        assert!(!cache.delete("non-existent"));
    }

    #[test]
    fn test_store_keys_insertion_order() {
        let (cache, _) = test_cache();

        cache.set("b", "1".to_string(), 1000).unwrap();
        cache.set("a", "2".to_string(), 1000).unwrap();
        cache.set("c", "3".to_string(), 1000).unwrap();
        cache.set("b", "4".to_string(), 1000).unwrap();

        assert_eq!(cache.keys(None), vec!["b", "a", "c"]);

        cache.delete("b");
        cache.set("b", "5".to_string(), 1000).unwrap();

        assert_eq!(cache.keys(None), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_store_keys_filtered() {
        let (cache, _) = test_cache();

        for key in ["user:1", "user:2", "session:1"] {
            cache.set(key, "value".to_string(), 1000).unwrap();
        }

        let users = cache.keys(Some(&|k: &str| k.starts_with("user:")));
        assert_eq!(users, vec!["user:1", "user:2"]);

        let none = cache.keys(Some(&|k: &str| k.starts_with("anything")));
        assert!(none.is_empty());
    }

    #[test]
    fn test_store_keys_filter_may_call_back_into_cache() {
        let (cache, clock) = test_cache();
        cache.set("live", "value".to_string(), 60_000).unwrap();
        cache.set("stale", "value".to_string(), 10).unwrap();
        clock.advance(10);

        let cache = Arc::new(cache);
        let (tx, rx) = std::sync::mpsc::channel();
        let worker = Arc::clone(&cache);
        std::thread::spawn(move || {
            let live = worker.keys(Some(&|k: &str| worker.is_valid(k)));
            let _ = tx.send(live);
        });

        let live = rx
            .recv_timeout(std::time::Duration::from_secs(3))
            .expect("keys() with a re-entrant filter should return");
        assert_eq!(live, vec!["live"]);

        let doomed = cache.keys(Some(&|k: &str| k == "stale" && cache.delete(k)));
        assert_eq!(doomed, vec!["stale"]);
        assert_eq!(cache.keys(None), vec!["live"]);
    }

    #[test]
    fn test_store_keys_is_a_snapshot() {
        let (cache, _) = test_cache();
        cache.set("key1", "value".to_string(), 1000).unwrap();

        let snapshot = cache.keys(None);
        cache.set("key2", "value".to_string(), 1000).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(cache.keys(None).len(), 2);
    }

    #[test]
    fn test_store_clear() {
        let (cache, _) = test_cache();

        for key in ["1", "2", "3"] {
            cache.set(key, "value".to_string(), 1).unwrap();
        }

        cache.clear();
        assert!(cache.keys(None).is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
