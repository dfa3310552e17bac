//! Cache Store Module
//!
//! Main cache engine combining the LRU entry list with per-category TTL
//! expiration, bulk invalidation and hit/miss statistics.
//!
//! Every public operation takes the single state lock for its whole logical
//! duration, so recency order and counters stay consistent when the cache is
//! shared across threads or tasks through an `Arc`.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::memory::estimate_entry_bytes;
use crate::cache::{
    enforce_capacity, CacheEntry, Clock, InvalidationCriterion, LruList, ResourceCounters,
    StatsCollector, StatsSnapshot, SystemClock, TtlPolicy, UNKNOWN_RESOURCE,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

#[derive(Debug)]
struct CacheState<V> {
    entries: LruList<CacheEntry<V>>,
    stats: StatsCollector,
}

// == Resource Cache ==
/// Process-local cache with LRU eviction and per-category TTL.
///
/// Construct one instance and share it with `Arc`; all operations take `&self`.
#[derive(Debug)]
pub struct ResourceCache<V, C = SystemClock> {
    state: Mutex<CacheState<V>>,
    ttl_policy: TtlPolicy,
    max_entries: usize,
    sweep_interval: Duration,
    clock: C,
}

impl<V: Clone> ResourceCache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache driven by the system clock.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidConfig`] if `max_entries` or
    /// `sweep_interval` is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<V: Clone, C: Clock> ResourceCache<V, C> {
    /// Creates a cache driven by a custom clock (useful for testing).
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidConfig`] if `max_entries` or
    /// `sweep_interval` is zero.
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        if config.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be greater than zero".to_string(),
            ));
        }
        if config.sweep_interval == 0 {
            return Err(CacheError::InvalidConfig(
                "sweep_interval must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            state: Mutex::new(CacheState {
                entries: LruList::new(),
                stats: StatsCollector::new(),
            }),
            ttl_policy: config.ttl_policy,
            max_entries: config.max_entries,
            sweep_interval: Duration::from_secs(config.sweep_interval),
            clock,
        })
    }

    // == Set ==
    /// Stores `value` under `key`, classified as `resource_type`.
    ///
    /// An existing entry is fully replaced: value, category and timestamps are
    /// reset and it becomes the most recently used. A new key may push the
    /// least recently used entries out to stay within capacity.
    pub fn set(&self, key: impl Into<String>, value: V, resource_type: &str) {
        let key = key.into();
        let ttl = self.ttl_policy.ttl_for(resource_type);
        let entry = CacheEntry::new(value, resource_type, self.clock.now(), ttl);
        debug!("Cache set: {} ({}, ttl {:?})", key, resource_type, ttl);

        let mut guard = self.state.lock();
        let state = &mut *guard;

        if state.entries.push_back(key, entry).is_none() {
            let evicted = enforce_capacity(&mut state.entries, self.max_entries);
            state.stats.record_evictions(evicted.len());
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A live entry counts as a hit for its category and becomes the most
    /// recently used. An absent key counts as a miss in the `"unknown"`
    /// bucket; an expired entry is removed, counts as a miss for its own
    /// category and as one expiration.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let Some(entry) = state.entries.get(key) else {
            state.stats.record_miss(UNKNOWN_RESOURCE);
            debug!("Cache miss: {}", key);
            return None;
        };

        if entry.is_expired(now) {
            if let Some(entry) = state.entries.remove(key) {
                state.stats.record_miss(&entry.resource_type);
                state.stats.record_expiration();
            }
            debug!("Cache miss (expired): {}", key);
            return None;
        }

        let value = entry.value.clone();
        state.stats.record_hit(&entry.resource_type);
        state.entries.touch(key);
        Some(value)
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns true only if a live entry was removed. Statistics and the
    /// order of other entries are untouched.
    pub fn delete(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut guard = self.state.lock();

        match guard.entries.remove(key) {
            Some(entry) => !entry.is_expired(now),
            None => false,
        }
    }

    // == Has ==
    /// Checks for a live entry without counting a hit/miss or refreshing recency.
    ///
    /// Read-only: an expired entry stays in place so a later `get` still
    /// attributes its miss to the entry's own category.
    pub fn has(&self, key: &str) -> bool {
        let now = self.clock.now();
        let guard = self.state.lock();

        guard
            .entries
            .get(key)
            .map_or(false, |entry| !entry.is_expired(now))
    }

    // == Invalidate ==
    /// Removes every entry selected by `criterion` in one pass over the store.
    ///
    /// Accepts a prefix (`&str`/`String`), a compiled `Regex`, or an
    /// [`InvalidationCriterion`]. Returns the number of live entries removed;
    /// matching entries that had already expired are dropped but not counted.
    pub fn invalidate(&self, criterion: impl Into<InvalidationCriterion>) -> usize {
        let criterion = criterion.into();
        let now = self.clock.now();

        let mut guard = self.state.lock();
        let state = &mut *guard;

        let removed = state.entries.remove_where(|key, _| criterion.matches(key));
        let count = removed
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .count();
        state.stats.record_invalidations(count);
        drop(guard);

        if count > 0 {
            info!("Invalidated {} entries matching {}", count, criterion);
        } else {
            debug!("Invalidation matched no live entries for {}", criterion);
        }
        count
    }

    /// Prefix invalidation to call right after writing to the backing resource.
    pub fn invalidate_after_mutation(&self, prefix: &str) -> usize {
        self.invalidate(InvalidationCriterion::prefix(prefix))
    }

    // == Keys ==
    /// Lists live keys from least to most recently used, optionally filtered
    /// by prefix. Recency is not affected.
    pub fn keys(&self, prefix: Option<&str>) -> Vec<String> {
        let now = self.clock.now();
        let guard = self.state.lock();

        guard
            .entries
            .iter()
            .filter(|(key, entry)| {
                !entry.is_expired(now) && prefix.map_or(true, |p| key.starts_with(p))
            })
            .map(|(key, _)| key.to_string())
            .collect()
    }

    // == Clear ==
    /// Removes all entries and resets every statistics counter.
    pub fn clear(&self) {
        let mut guard = self.state.lock();
        let removed = guard.entries.len();
        guard.entries.clear();
        guard.stats.reset();
        drop(guard);

        info!("Cache cleared: removed {} entries", removed);
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let removed = state.entries.remove_where(|_, entry| entry.is_expired(now));
        state.stats.record_expirations(removed.len());
        removed.len()
    }

    // == Cache-Aside ==
    /// Returns the cached value for `key`, or loads, stores and returns it.
    ///
    /// The loader runs only on a miss. Its error is returned unchanged and
    /// nothing is cached for it. The lock is not held while the loader runs,
    /// so concurrent misses on the same key may each invoke their loader.
    pub async fn get_or_set<F, Fut, E>(
        &self,
        key: &str,
        resource_type: &str,
        loader: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        debug!("Loading {} ({}) after cache miss", key, resource_type);
        let value = loader().await?;
        self.set(key, value.clone(), resource_type);
        Ok(value)
    }

    /// Hit/miss counters for one category, if it has been read.
    pub fn resource_stats(&self, resource_type: &str) -> Option<ResourceCounters> {
        self.state.lock().stats.resource(resource_type)
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Interval the background sweeper uses when started with
    /// [`spawn_configured_sweeper`](crate::tasks::spawn_configured_sweeper).
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    pub fn ttl_policy(&self) -> &TtlPolicy {
        &self.ttl_policy
    }
}

impl<V: Clone + Serialize, C: Clock> ResourceCache<V, C> {
    // == Stats ==
    /// Returns a statistics report.
    ///
    /// `size`, `memory_estimate` and `oldest_entry` cover live entries only.
    /// Live entries are copied out under the lock; the memory estimate is
    /// computed after it is released.
    pub fn stats(&self) -> StatsSnapshot {
        let now = self.clock.now();
        let (live, counters) = {
            let guard = self.state.lock();
            let live: Vec<(String, CacheEntry<V>)> = guard
                .entries
                .iter()
                .filter(|(_, entry)| !entry.is_expired(now))
                .map(|(key, entry)| (key.to_string(), entry.clone()))
                .collect();
            (live, guard.stats.clone())
        };

        let mut memory_bytes = 0;
        let mut oldest: Option<DateTime<Utc>> = None;

        for (key, entry) in &live {
            memory_bytes += estimate_entry_bytes(key, entry);
            oldest = Some(oldest.map_or(entry.created_at, |o| o.min(entry.created_at)));
        }

        counters.snapshot(live.len(), memory_bytes, oldest)
    }
}
