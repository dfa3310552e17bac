//! Resource Cache - A process-local cache for derived application data
//!
//! Provides LRU eviction, per-category TTL expiration, prefix/pattern
//! invalidation, hit/miss statistics and a cache-aside helper.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;
pub mod telemetry;

pub use cache::{
    Clock, InvalidationCriterion, MockClock, ResourceCache, StatsSnapshot, SystemClock, TtlPolicy,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::{spawn_configured_sweeper, spawn_sweeper};
