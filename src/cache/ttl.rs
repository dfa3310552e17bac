//! TTL Policy Module
//!
//! Static mapping from resource category to time-to-live, with a fallback for
//! categories that are not listed.

use std::collections::HashMap;
use std::time::Duration;

/// Default TTL applied to categories without an explicit entry (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Category for fast-changing counters.
pub const COUNTS_RESOURCE: &str = "counts";

/// TTL for [`COUNTS_RESOURCE`] entries.
pub const COUNTS_TTL: Duration = Duration::from_secs(30);

// == TTL Policy ==
/// Resolves every resource category to some TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlPolicy {
    default_ttl: Duration,
    overrides: HashMap<String, Duration>,
}

impl TtlPolicy {
    /// Creates a policy with no per-category entries.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            overrides: HashMap::new(),
        }
    }

    /// Adds or replaces the TTL for one category.
    pub fn with_ttl(mut self, resource_type: impl Into<String>, ttl: Duration) -> Self {
        self.overrides.insert(resource_type.into(), ttl);
        self
    }

    /// Replaces the fallback TTL, keeping per-category entries.
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Returns the TTL for `resource_type`, falling back to the default.
    pub fn ttl_for(&self, resource_type: &str) -> Duration {
        self.overrides
            .get(resource_type)
            .copied()
            .unwrap_or(self.default_ttl)
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Iterates the explicit per-category entries.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL).with_ttl(COUNTS_RESOURCE, COUNTS_TTL)
    }
}
