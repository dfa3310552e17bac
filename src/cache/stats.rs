//! Cache Statistics Module
//!
//! Tracks hit/miss counters per resource category along with eviction,
//! expiration and invalidation totals.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::memory::format_bytes;

/// Bucket for misses on keys that were never stored.
pub const UNKNOWN_RESOURCE: &str = "unknown";

// == Resource Counters ==
/// Hit and miss counts for a single resource category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCounters {
    pub hits: u64,
    pub misses: u64,
}

impl ResourceCounters {
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate as a percentage, or `None` before the first access.
    pub fn hit_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.hits as f64 / total as f64 * 100.0),
        }
    }
}

// == Stats Collector ==
/// Running counters owned by the cache and updated under its lock.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    by_resource: HashMap<String, ResourceCounters>,
    evictions: u64,
    expirations: u64,
    invalidations: u64,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters_mut(&mut self, resource_type: &str) -> &mut ResourceCounters {
        self.by_resource
            .entry(resource_type.to_string())
            .or_default()
    }

    // == Record Hit ==
    pub fn record_hit(&mut self, resource_type: &str) {
        self.counters_mut(resource_type).hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self, resource_type: &str) {
        self.counters_mut(resource_type).misses += 1;
    }

    // == Record Eviction ==
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Record Expiration ==
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    // == Record Invalidation ==
    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub fn total_hits(&self) -> u64 {
        self.by_resource.values().map(|c| c.hits).sum()
    }

    pub fn total_misses(&self) -> u64 {
        self.by_resource.values().map(|c| c.misses).sum()
    }

    /// Counters for one category, if it has been accessed.
    pub fn resource(&self, resource_type: &str) -> Option<ResourceCounters> {
        self.by_resource.get(resource_type).copied()
    }

    /// Hit-rate percentages, omitting categories with no accesses.
    pub fn hit_rate_by_resource(&self) -> BTreeMap<String, f64> {
        self.by_resource
            .iter()
            .filter_map(|(resource, counters)| {
                counters.hit_rate().map(|rate| (resource.clone(), rate))
            })
            .collect()
    }

    // == Reset ==
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // == Snapshot ==
    /// Combines the counters with store-derived figures into a report.
    pub fn snapshot(
        &self,
        size: usize,
        memory_estimate_bytes: u64,
        oldest_entry: Option<DateTime<Utc>>,
    ) -> StatsSnapshot {
        StatsSnapshot {
            total_hits: self.total_hits(),
            total_misses: self.total_misses(),
            hit_rate_by_resource: self.hit_rate_by_resource(),
            size,
            memory_estimate: format_bytes(memory_estimate_bytes),
            memory_estimate_bytes,
            oldest_entry,
            evictions: self.evictions,
            expirations: self.expirations,
            invalidations: self.invalidations,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time cache report for operational tuning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Hits across all categories since the last reset
    pub total_hits: u64,
    /// Misses across all categories since the last reset
    pub total_misses: u64,
    /// Percentage hit rate per category with at least one access
    pub hit_rate_by_resource: BTreeMap<String, f64>,
    /// Live (non-expired) entries
    pub size: usize,
    /// Human-readable footprint approximation
    pub memory_estimate: String,
    pub memory_estimate_bytes: u64,
    /// Creation time of the longest-lived live entry
    pub oldest_entry: Option<DateTime<Utc>>,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Expired entries reclaimed by `get` or by `sweep_expired`; `delete`
    /// and `invalidate` drop expired entries without counting them
    pub expirations: u64,
    /// Live entries removed by invalidation
    pub invalidations: u64,
}

impl StatsSnapshot {
    /// Overall hit rate as a percentage, or 0.0 if nothing was read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_hits + self.total_misses;
        if total == 0 {
            0.0
        } else {
            self.total_hits as f64 / total as f64 * 100.0
        }
    }
}
