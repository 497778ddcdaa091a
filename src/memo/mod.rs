//! Memoization Module
//!
//! Transparent caching of function results keyed by function identity and
//! argument fingerprint.
//!
//! Cached results follow a simple lifecycle: absent, then live after the first
//! call, then stale once the TTL elapses (still stored, but recomputed on the
//! next call), and absent again after invalidation. Stale results are never
//! reclaimed in the background.

mod memoized;
mod memoizer;

pub use memoized::{key_prefix, FunctionHash, Memoized};
pub use memoizer::Memoizer;
