//! Statistics Cache Module
//!
//! Decorator that counts cache operations on their way to the wrapped cache.

use tracing::debug;

use crate::cache::{CacheApi, IntoCacheKey, KeyFilter};
use crate::error::Result;
use crate::stats::{Statistics, StatisticsSnapshot};

// == Statistics Cache ==
/// Wraps a cache and counts `set`, `get`, `is_valid` and `delete` once
/// statistics are enabled. `has`, `keys` and `clear` pass through uncounted.
///
/// Compose it at construction: `StatisticsCache::new(Cache::new())`.
#[derive(Debug, Default)]
pub struct StatisticsCache<C> {
    inner: C,
    stats: Statistics,
}

impl<C: CacheApi> StatisticsCache<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            stats: Statistics::new(),
        }
    }

    /// The wrapped cache. Calls made on it directly are not counted.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    // == Enable Statistics ==
    /// Starts counting from zero.
    ///
    /// # Errors
    /// `AlreadyEnabled` if statistics were enabled before; the cache itself
    /// keeps working.
    pub fn enable_statistics(&self) -> Result<()> {
        self.stats.enable()?;
        debug!("Cache statistics enabled");
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.stats.is_enabled()
    }

    // == Statistics ==
    /// Current counters, or `None` before statistics are enabled.
    pub fn statistics(&self) -> Option<StatisticsSnapshot> {
        self.stats.snapshot()
    }
}

impl<C: CacheApi> CacheApi for StatisticsCache<C> {
    type Value = C::Value;

    fn has(&self, key: &str) -> bool {
        self.inner.has(key)
    }

    fn set<K: IntoCacheKey>(&self, key: K, value: Self::Value, ttl_ms: i64) -> Result<()> {
        self.inner.set(key, value, ttl_ms)?;
        self.stats.record_set();
        Ok(())
    }

    fn get(&self, key: &str) -> Option<Self::Value> {
        let value = self.inner.get(key);
        self.stats.record_get(value.is_some());
        value
    }

    fn is_valid(&self, key: &str) -> bool {
        let valid = self.inner.is_valid(key);
        self.stats.record_is_valid(valid);
        valid
    }

    fn delete(&self, key: &str) -> bool {
        let deleted = self.inner.delete(key);
        if deleted {
            self.stats.record_delete();
        }
        deleted
    }

    fn keys(&self, filter: Option<KeyFilter<'_>>) -> Vec<String> {
        self.inner.keys(filter)
    }

    fn clear(&self) {
        self.inner.clear()
    }
}
