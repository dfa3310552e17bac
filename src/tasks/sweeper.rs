//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Expired entries are already invisible to readers; sweeping only reclaims
//! their memory ahead of the next access that would have dropped them.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, ResourceCache};

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between sweeps.
/// Each sweep holds the cache lock only for the duration of one pass.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(ResourceCache::<String>::new(CacheConfig::default())?);
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper<V, C>(cache: Arc<ResourceCache<V, C>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!("Starting expiry sweeper with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

/// Spawns the sweeper at the interval the cache was configured with.
///
/// Equivalent to `spawn_sweeper(cache, cache.sweep_interval())`, so
/// `RESOURCE_CACHE_SWEEP_INTERVAL` takes effect through [`CacheConfig::from_env`].
///
/// [`CacheConfig::from_env`]: crate::config::CacheConfig::from_env
pub fn spawn_configured_sweeper<V, C>(cache: Arc<ResourceCache<V, C>>) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
    C: Clock + 'static,
{
    let interval = cache.sweep_interval();
    spawn_sweeper(cache, interval)
}
