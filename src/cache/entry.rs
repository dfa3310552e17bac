//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// The key lives on the LRU node that owns the entry, and recency is the
/// node's position in that list.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Category used for TTL lookup and statistics grouping
    pub resource_type: String,
    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
    /// Expiration timestamp
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped at `now` that lives for `ttl`.
    ///
    /// A TTL too large to represent saturates to the latest representable instant.
    pub fn new(value: V, resource_type: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value,
            resource_type: resource_type.into(),
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// fully elapsed TTL takes effect immediately.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once expired.
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}
