//! Cache Module
//!
//! Provides in-memory caching with per-category TTL expiration, LRU eviction,
//! bulk invalidation and hit/miss statistics.

mod clock;
mod entry;
mod eviction;
mod invalidation;
mod lru;
pub mod memory;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use clock::{Clock, MockClock, SystemClock};
pub use entry::CacheEntry;
pub use eviction::enforce_capacity;
pub use invalidation::InvalidationCriterion;
pub use lru::{Iter, LruList};
pub use stats::{ResourceCounters, StatsCollector, StatsSnapshot, UNKNOWN_RESOURCE};
pub use store::ResourceCache;
pub use ttl::{TtlPolicy, COUNTS_RESOURCE, COUNTS_TTL, DEFAULT_TTL};
