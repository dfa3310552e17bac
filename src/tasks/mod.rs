//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Expiry Sweeper: Removes expired cache entries at a configured interval

mod sweeper;

pub use sweeper::{spawn_configured_sweeper, spawn_sweeper};
