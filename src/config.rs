//! Configuration Module
//!
//! Loads the demo binary's settings from environment variables. The library
//! itself takes no configuration beyond per-call TTLs.

use std::env;

use crate::time;

/// Demo configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long memoized results stay live, in milliseconds
    pub ttl_ms: i64,
    /// Pause between calls once a caller sees cached results, in milliseconds
    pub polling_rate_ms: u64,
    /// How long the memoized function takes to compute, in milliseconds
    pub work_delay_ms: u64,
    /// Calls returning faster than this are treated as cache hits, in milliseconds
    pub cached_threshold_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMO_TTL_MS` - TTL of memoized results (default: 6000)
    /// - `POLLING_RATE_MS` - Pause after a cached call (default: 333)
    /// - `WORK_DELAY_MS` - Duration of the memoized work (default: 2000)
    /// - `CACHED_THRESHOLD_MS` - Cache-hit latency threshold (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_ms: env::var("MEMO_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(defaults.ttl_ms),
            polling_rate_ms: env::var("POLLING_RATE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|rate: &u64| *rate > 0)
                .unwrap_or(defaults.polling_rate_ms),
            work_delay_ms: env::var("WORK_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.work_delay_ms),
            cached_threshold_ms: env::var("CACHED_THRESHOLD_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cached_threshold_ms),
        }
    }

    /// Number of calls each demo caller makes: one TTL's worth of polling.
    pub fn iterations(&self) -> u64 {
        (self.ttl_ms as u64) / self.polling_rate_ms
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: 6 * time::SECOND,
            polling_rate_ms: 333,
            work_delay_ms: 2000,
            cached_threshold_ms: 10,
        }
    }
}
