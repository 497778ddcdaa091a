//! Statistics Counters Module
//!
//! Per-operation counters and their serializable snapshot.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;

use crate::error::{CacheError, Result};

// == Snapshot Types ==
/// Outcome counts for `get`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HitMiss {
    /// Lookups that found a value
    pub hit: u64,
    /// Lookups that found nothing
    pub miss: u64,
}

/// Outcome counts for `is_valid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrueFalse {
    #[serde(rename = "true")]
    pub valid: u64,
    #[serde(rename = "false")]
    pub invalid: u64,
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsSnapshot {
    /// Successful `set` calls
    pub set: u64,
    pub get: HitMiss,
    #[serde(rename = "isValid")]
    pub is_valid: TrueFalse,
    /// `delete` calls that removed an entry
    pub delete: u64,
}

// == Statistics ==
/// Lock-free counters that only count once enabled.
#[derive(Debug, Default)]
pub struct Statistics {
    enabled: AtomicBool,
    set: AtomicU64,
    get_hit: AtomicU64,
    get_miss: AtomicU64,
    is_valid_true: AtomicU64,
    is_valid_false: AtomicU64,
    delete: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    // == Enable ==
    /// Zeroes every counter and starts counting.
    ///
    /// # Errors
    /// `AlreadyEnabled` on any call after the first.
    pub fn enable(&self) -> Result<()> {
        if self.is_enabled() {
            return Err(CacheError::AlreadyEnabled);
        }

        for counter in self.counters() {
            counter.store(0, Ordering::Relaxed);
        }

        self.enabled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| CacheError::AlreadyEnabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    // == Record ==
    pub fn record_set(&self) {
        self.bump(&self.set);
    }

    /// Records a `get` outcome: hit if a value was found.
    pub fn record_get(&self, hit: bool) {
        self.bump(if hit { &self.get_hit } else { &self.get_miss });
    }

    pub fn record_is_valid(&self, valid: bool) {
        self.bump(if valid {
            &self.is_valid_true
        } else {
            &self.is_valid_false
        });
    }

    pub fn record_delete(&self) {
        self.bump(&self.delete);
    }

    // == Snapshot ==
    /// Current counter values, or `None` while disabled.
    pub fn snapshot(&self) -> Option<StatisticsSnapshot> {
        if !self.is_enabled() {
            return None;
        }

        Some(StatisticsSnapshot {
            set: self.set.load(Ordering::Relaxed),
            get: HitMiss {
                hit: self.get_hit.load(Ordering::Relaxed),
                miss: self.get_miss.load(Ordering::Relaxed),
            },
            is_valid: TrueFalse {
                valid: self.is_valid_true.load(Ordering::Relaxed),
                invalid: self.is_valid_false.load(Ordering::Relaxed),
            },
            delete: self.delete.load(Ordering::Relaxed),
        })
    }

    fn bump(&self, counter: &AtomicU64) {
        if self.is_enabled() {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn counters(&self) -> [&AtomicU64; 6] {
        [
            &self.set,
            &self.get_hit,
            &self.get_miss,
            &self.is_valid_true,
            &self.is_valid_false,
            &self.delete,
        ]
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_disabled_by_default() {
        let stats = Statistics::new();
        assert!(!stats.is_enabled());
        assert_eq!(stats.snapshot(), None);
    }

    #[test]
    fn test_stats_ignore_records_while_disabled() {
        let stats = Statistics::new();
        stats.record_set();
        stats.record_get(true);

        stats.enable().unwrap();

        assert_eq!(stats.snapshot(), Some(StatisticsSnapshot::default()));
    }

    #[test]
    fn test_stats_enable_twice_fails() {
        let stats = Statistics::new();
        stats.enable().unwrap();

        assert_eq!(stats.enable(), Err(CacheError::AlreadyEnabled));
        assert!(stats.is_enabled());
    }

    #[test]
    fn test_stats_record() {
        let stats = Statistics::new();
        stats.enable().unwrap();

        stats.record_set();
        stats.record_set();
        stats.record_get(true);
        stats.record_get(false);
        stats.record_get(false);
        stats.record_is_valid(true);
        stats.record_is_valid(false);
        stats.record_delete();

        let snapshot = stats.snapshot().unwrap();
        assert_eq!(snapshot.set, 2);
        assert_eq!(snapshot.get, HitMiss { hit: 1, miss: 2 });
        assert_eq!(snapshot.is_valid, TrueFalse { valid: 1, invalid: 1 });
        assert_eq!(snapshot.delete, 1);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = StatisticsSnapshot {
            set: 1,
            get: HitMiss { hit: 2, miss: 3 },
            is_valid: TrueFalse { valid: 4, invalid: 5 },
            delete: 6,
        };

        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "set": 1,
                "get": { "hit": 2, "miss": 3 },
                "isValid": { "true": 4, "false": 5 },
                "delete": 6
            })
        );
    }
}
