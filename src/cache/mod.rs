//! Cache Module
//!
//! Provides in-memory caching with lazily evaluated TTL expiration.

mod api;
mod clock;
mod entry;
mod key;
mod order;
mod store;


// Re-export public types
pub use api::{CacheApi, KeyFilter};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{validate_key, CacheKey, IntoCacheKey};
pub(crate) use order::InsertionOrder;
pub use store::Cache;
