//! Error types for the resource cache
//!
//! Provides unified error handling using thiserror.
//!
//! Cache misses are never errors: lookups return `None` or `false`. The only
//! failures the engine itself can report come from construction and from
//! compiling an invalidation pattern.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the resource cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalidation pattern failed to compile
    #[error("Invalid invalidation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the resource cache.
pub type Result<T> = std::result::Result<T, CacheError>;
