//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::TtlPolicy;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Per-category TTL table with its fallback
    pub ttl_policy: TtlPolicy,
    /// Background sweep interval in seconds, used by `spawn_configured_sweeper`
    pub sweep_interval: u64,
}

impl CacheConfig {
    /// Creates a config with the given capacity and default TTL policy.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Replaces the TTL policy.
    pub fn ttl_policy(mut self, ttl_policy: TtlPolicy) -> Self {
        self.ttl_policy = ttl_policy;
        self
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// Unparsable values fall back to their defaults with a warning.
    ///
    /// # Environment Variables
    /// - `RESOURCE_CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `RESOURCE_CACHE_DEFAULT_TTL` - Fallback TTL in seconds (default: 300)
    /// - `RESOURCE_CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `RESOURCE_CACHE_TTL_OVERRIDES` - Per-category TTLs, e.g. `counts=30,reports=900`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_entries = env_parse("RESOURCE_CACHE_MAX_ENTRIES").unwrap_or(defaults.max_entries);
        let sweep_interval =
            env_parse("RESOURCE_CACHE_SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval);

        let mut ttl_policy = defaults.ttl_policy;
        if let Some(secs) = env_parse::<u64>("RESOURCE_CACHE_DEFAULT_TTL") {
            ttl_policy = ttl_policy.with_default_ttl(Duration::from_secs(secs));
        }
        if let Ok(raw) = env::var("RESOURCE_CACHE_TTL_OVERRIDES") {
            for (resource_type, ttl) in parse_ttl_overrides(&raw) {
                ttl_policy = ttl_policy.with_ttl(resource_type, ttl);
            }
        }

        Self {
            max_entries,
            ttl_policy,
            sweep_interval,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            ttl_policy: TtlPolicy::default(),
            sweep_interval: 60,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}, using default", name, raw);
            None
        }
    }
}

/// Parses `category=seconds` pairs separated by commas.
///
/// Malformed pairs are skipped with a warning.
pub fn parse_ttl_overrides(raw: &str) -> Vec<(String, Duration)> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let parsed = pair.split_once('=').and_then(|(name, secs)| {
                let name = name.trim();
                let secs = secs.trim().parse::<u64>().ok()?;
                (!name.is_empty()).then(|| (name.to_string(), Duration::from_secs(secs)))
            });
            if parsed.is_none() {
                warn!("Ignoring malformed TTL override {:?}", pair);
            }
            parsed
        })
        .collect()
}
