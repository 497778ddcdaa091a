//! Cache API Module
//!
//! The operation set shared by the cache store and its decorators.

use std::sync::Arc;

use crate::cache::IntoCacheKey;
use crate::error::Result;

/// Predicate used to filter `keys`.
pub type KeyFilter<'a> = &'a dyn Fn(&str) -> bool;

// == Cache API ==
/// TTL key-value operations.
///
/// Implemented by [`Cache`](crate::cache::Cache) and by decorators such as
/// [`StatisticsCache`](crate::stats::StatisticsCache), so collaborators like the
/// memoizer work with either.
pub trait CacheApi {
    /// Payload type stored in the cache.
    type Value;

    /// True if `key` is stored, live or expired.
    fn has(&self, key: &str) -> bool;

    /// Stores `value` under `key` for `ttl_ms` milliseconds, overwriting any
    /// previous entry.
    ///
    /// # Errors
    /// - `InvalidTtl` if `ttl_ms <= 0`
    /// - `InvalidKey` if the key is an empty string or a non-finite number
    fn set<K: IntoCacheKey>(&self, key: K, value: Self::Value, ttl_ms: i64) -> Result<()>;

    /// Stored value for `key`, ignoring expiry.
    fn get(&self, key: &str) -> Option<Self::Value>;

    /// True if `key` is stored and its TTL has not elapsed.
    fn is_valid(&self, key: &str) -> bool;

    /// Removes `key`. Returns false if it was not stored.
    fn delete(&self, key: &str) -> bool;

    /// Snapshot of stored keys (live or expired) in insertion order.
    fn keys(&self, filter: Option<KeyFilter<'_>>) -> Vec<String>;

    /// Removes every entry.
    fn clear(&self);
}

impl<C: CacheApi> CacheApi for Arc<C> {
    type Value = C::Value;

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }

    fn set<K: IntoCacheKey>(&self, key: K, value: Self::Value, ttl_ms: i64) -> Result<()> {
        (**self).set(key, value, ttl_ms)
    }

    fn get(&self, key: &str) -> Option<Self::Value> {
        (**self).get(key)
    }

    fn is_valid(&self, key: &str) -> bool {
        (**self).is_valid(key)
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }

    fn keys(&self, filter: Option<KeyFilter<'_>>) -> Vec<String> {
        (**self).keys(filter)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
