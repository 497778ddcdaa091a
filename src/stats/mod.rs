//! Statistics Module
//!
//! Optional operation counters layered over a cache as a decorator.

mod counters;
mod instrumented;

pub use counters::{HitMiss, Statistics, StatisticsSnapshot, TrueFalse};
pub use instrumented::StatisticsCache;
