//! TTL Memo - An in-process TTL cache with function memoization
//!
//! Provides a TTL key-value cache, deterministic fingerprints for cache keys,
//! a memoizer that caches function results per argument, and an optional
//! statistics decorator.
//!
//! ```
//! use std::sync::Arc;
//! use ttl_memo::{time, Cache, CacheApi, FunctionIdentity, Memoizer};
//!
//! let cache: Arc<Cache<String>> = Arc::new(Cache::new());
//! let memoizer = Memoizer::new(Arc::clone(&cache));
//!
//! let greet = memoizer
//!     .memoize(FunctionIdentity::named("greet"), |name: &str| format!("hello {name}"), time::MINUTE)
//!     .unwrap();
//!
//! assert_eq!(greet.call("world").unwrap(), "hello world");
//! assert_eq!(cache.keys(None).len(), 1);
//!
//! memoizer.invalidate(&greet);
//! assert!(cache.is_empty());
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod hash;
pub mod memo;
pub mod stats;
pub mod time;

pub use cache::{validate_key, Cache, CacheApi, Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{CacheError, Result};
pub use hash::{Fingerprint, FunctionIdentity, HashCode};
pub use memo::{FunctionHash, Memoized, Memoizer};
pub use stats::{StatisticsCache, StatisticsSnapshot};
