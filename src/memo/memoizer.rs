//! Memoizer Module
//!
//! Wraps functions into cached callables and invalidates their results.

use std::sync::Arc;

use tracing::debug;

use crate::cache::CacheApi;
use crate::error::{CacheError, Result};
use crate::hash::{Fingerprint, FunctionIdentity};
use crate::memo::{key_prefix, FunctionHash, Memoized};

// == Memoizer ==
/// Creates memoized functions backed by one shared cache.
#[derive(Debug)]
pub struct Memoizer<C> {
    cache: Arc<C>,
}

impl<C> Clone for Memoizer<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<C: CacheApi> Memoizer<C> {
    // == Constructor ==
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// The cache memoized results are stored in.
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    // == Memoize ==
    /// Wraps `func`, caching each distinct argument's result for `ttl_ms`.
    ///
    /// The function hash is computed here, once.
    ///
    /// # Errors
    /// `InvalidTtl` if `ttl_ms <= 0`.
    pub fn memoize<A, F>(
        &self,
        identity: FunctionIdentity,
        func: F,
        ttl_ms: i64,
    ) -> Result<Memoized<C, F, A, C::Value>>
    where
        F: Fn(A) -> C::Value,
        A: Fingerprint,
        C::Value: Clone,
    {
        if ttl_ms <= 0 {
            return Err(CacheError::InvalidTtl(ttl_ms));
        }

        let memoized = Memoized::new(Arc::clone(&self.cache), identity, func, ttl_ms);
        debug!(
            "Memoized function '{}' (hash {}) with ttl {}ms",
            memoized.identity().name,
            memoized.function_hash(),
            ttl_ms
        );
        Ok(memoized)
    }

    // == Invalidate ==
    /// Deletes every cached result of a function, for all arguments.
    ///
    /// `target` may be the memoized function or its plain identity.
    /// Returns the number of entries removed.
    pub fn invalidate<T: FunctionHash + ?Sized>(&self, target: &T) -> usize {
        let prefix = key_prefix(target.function_hash());
        let keys = self
            .cache
            .keys(Some(&|k: &str| k.starts_with(prefix.as_str())));

        let removed = keys.iter().filter(|key| self.cache.delete(key)).count();
        debug!("Invalidated {} cached results with prefix '{}'", removed, prefix);
        removed
    }
}
