//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use crate::error::{CacheError, Result};

// == Cache Entry ==
/// A stored value together with the time it was cached and its TTL.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub cached_at: i64,
    /// Time to live in milliseconds, always positive
    pub ttl_ms: i64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry cached at `cached_at`.
    ///
    /// Fails with `InvalidTtl` if `ttl_ms <= 0`; no entry is created.
    pub fn new(value: V, cached_at: i64, ttl_ms: i64) -> Result<Self> {
        if ttl_ms <= 0 {
            return Err(CacheError::InvalidTtl(ttl_ms));
        }

        Ok(Self {
            value,
            cached_at,
            ttl_ms,
        })
    }

    // == Expires At ==
    /// Instant at which the entry stops being live. Saturates, so a TTL of
    /// `i64::MAX` never expires.
    pub fn expires_at(&self) -> i64 {
        self.cached_at.saturating_add(self.ttl_ms)
    }

    // == Is Live ==
    /// Checks liveness at `now`.
    ///
    /// Boundary condition: the entry is no longer live at the exact
    /// millisecond its TTL elapses (`now < cached_at + ttl`).
    pub fn is_live(&self, now: i64) -> bool {
        now < self.expires_at()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("test_value", 1_000, 60).unwrap();

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.cached_at, 1_000);
        assert_eq!(entry.ttl_ms, 60);
        assert_eq!(entry.expires_at(), 1_060);
    }

    #[test]
    fn test_entry_rejects_non_positive_ttl() {
        assert_eq!(CacheEntry::new((), 0, 0), Err(CacheError::InvalidTtl(0)));
        assert_eq!(CacheEntry::new((), 0, -1), Err(CacheError::InvalidTtl(-1)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("test", 0, 1000).unwrap();

        assert!(entry.is_live(0));
        assert!(entry.is_live(999));
        assert!(!entry.is_live(1000), "Entry should be expired at boundary");
        assert!(!entry.is_live(1001));
    }

    #[test]
    fn test_max_ttl_never_expires() {
        let entry = CacheEntry::new("forever", 1_700_000_000_000, i64::MAX).unwrap();

        assert_eq!(entry.expires_at(), i64::MAX);
        assert!(entry.is_live(i64::MAX - 1));
    }
}
