//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache, memoization and statistics operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// TTL was zero or negative
    #[error("TTL must be a positive number of milliseconds, got {0}")]
    InvalidTtl(i64),

    /// Key is not a non-empty string or a finite number
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Statistics were enabled a second time
    #[error("statistics are already enabled")]
    AlreadyEnabled,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
