//! Memoized Function Module
//!
//! A callable that caches the results of the function it wraps.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::cache::CacheApi;
use crate::error::Result;
use crate::hash::{Fingerprint, FunctionIdentity, HashCode};

// == Function Hash ==
/// Resolves the hash that prefixes a function's cache keys.
///
/// A [`Memoized`] returns the hash it computed at wrap time; a
/// [`FunctionIdentity`] hashes itself on demand. Both agree for the same
/// identity.
pub trait FunctionHash {
    fn function_hash(&self) -> i32;
}

impl FunctionHash for FunctionIdentity {
    fn function_hash(&self) -> i32 {
        HashCode::of_function(self)
    }
}

/// Prefix shared by every cache key of the function with `function_hash`.
pub fn key_prefix(function_hash: i32) -> String {
    format!("{}:", function_hash)
}

// == Memoized ==
/// A wrapped function whose results are cached under
/// `"<function hash>:<argument hash>"`.
///
/// Arguments are passed as one value; use a tuple for several. The cache's
/// payload type must equal the function's return type.
pub struct Memoized<C, F, A, R> {
    cache: Arc<C>,
    identity: FunctionIdentity,
    function_hash: i32,
    func: F,
    ttl_ms: i64,
    _signature: PhantomData<fn(A) -> R>,
}

impl<C, F, A, R> Memoized<C, F, A, R>
where
    C: CacheApi<Value = R>,
    F: Fn(A) -> R,
    A: Fingerprint,
    R: Clone,
{
    pub(crate) fn new(cache: Arc<C>, identity: FunctionIdentity, func: F, ttl_ms: i64) -> Self {
        let function_hash = HashCode::of_function(&identity);
        Self {
            cache,
            identity,
            function_hash,
            func,
            ttl_ms,
            _signature: PhantomData,
        }
    }

    // == Call ==
    /// Returns the cached result for `args` while it is live, otherwise calls
    /// the wrapped function and caches what it returns.
    pub fn call(&self, args: A) -> Result<R> {
        let key = self.key_for(&args);

        if self.cache.is_valid(&key) {
            if let Some(value) = self.cache.get(&key) {
                trace!("Memo hit: {}", key);
                return Ok(value);
            }
        }

        trace!("Memo miss: {}", key);
        let value = (self.func)(args);
        self.cache.set(key, value.clone(), self.ttl_ms)?;
        Ok(value)
    }

    // == Key For ==
    /// Cache key that `call(args)` reads and writes.
    pub fn key_for(&self, args: &A) -> String {
        format!("{}{}", key_prefix(self.function_hash), HashCode::of(args))
    }
}

impl<C, F, A, R> Memoized<C, F, A, R> {
    /// The wrapped function, bypassing the cache.
    pub fn original(&self) -> &F {
        &self.func
    }

    pub fn identity(&self) -> &FunctionIdentity {
        &self.identity
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }
}

impl<C, F, A, R> FunctionHash for Memoized<C, F, A, R> {
    fn function_hash(&self) -> i32 {
        self.function_hash
    }
}

impl<C, F, A, R> fmt::Debug for Memoized<C, F, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("identity", &self.identity)
            .field("function_hash", &self.function_hash)
            .field("ttl_ms", &self.ttl_ms)
            .finish_non_exhaustive()
    }
}
