//! Background expiry sweeper.

use super::config::MIN_SWEEP_INTERVAL;
use super::manager::ResponseCache;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Periodically removes expired entries from a [`ResponseCache`].
///
/// Lookups already ignore expired entries; the sweeper only bounds memory held
/// by entries that are written once and never read again. The task keeps a
/// weak reference, so it never extends the cache's lifetime.
pub struct ExpirySweeper {
    cache: Weak<ResponseCache>,
    interval: Duration,
}

impl ExpirySweeper {
    /// Sweeper ticking at the cache's configured interval.
    pub fn new(cache: &Arc<ResponseCache>) -> Self {
        Self {
            interval: cache.config().sweep_interval(),
            cache: Arc::downgrade(cache),
        }
    }

    /// Override the sweep period. Periods under one second are raised to one
    /// second.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_SWEEP_INTERVAL);
        self
    }

    /// Spawn the sweep loop on the current tokio runtime. The first sweep runs
    /// one full interval after this call.
    pub fn spawn(self) -> SweeperHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(self.run(token.clone()));
        SweeperHandle {
            token,
            task: Some(task),
        }
    }

    async fn run(self, token: CancellationToken) {
        let period = self.interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(interval_secs = period.as_secs(), "expiry sweeper started");

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let Some(cache) = self.cache.upgrade() else {
                break;
            };
            cache.purge_expired();
        }
        debug!("expiry sweeper stopped");
    }
}

/// Owns a running sweeper. Dropping the handle stops the task.
pub struct SweeperHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Ask the sweeper to stop after its current pass.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Stop the sweeper and wait for the task to exit.
    pub async fn join(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, CacheKind};
    use serde_json::json;

    const MINUTE: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_reclaims_unread_entries() {
        let cache = Arc::new(
            ResponseCache::new(CacheConfig::new().with_sweep_interval(5 * MINUTE)).unwrap(),
        );
        cache.set(&CacheKind::Trends, &json!({ "p": 1 }), &1u8).unwrap();
        cache.set(&CacheKind::Content, &json!({ "p": 1 }), &1u8).unwrap();
        let handle = ExpirySweeper::new(&cache).spawn();

        tokio::time::sleep(10 * MINUTE).await;
        assert_eq!(cache.len(), 2);

        tokio::time::sleep(6 * MINUTE).await;
        assert_eq!(cache.len(), 1);

        tokio::time::sleep(50 * MINUTE).await;
        assert!(cache.is_empty());
        // Sweeping does not touch the request counters.
        assert_eq!(cache.stats().total_requests, 0);

        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised_to_one_second() {
        let cache = Arc::new(ResponseCache::default());
        let sweeper = ExpirySweeper::new(&cache).with_interval(Duration::ZERO);
        assert_eq!(sweeper.interval, Duration::from_secs(1));

        cache.set(&CacheKind::Trends, &json!({ "p": 1 }), &1u8).unwrap();
        let handle = sweeper.spawn();
        tokio::time::sleep(15 * MINUTE - Duration::from_millis(500)).await;
        assert_eq!(cache.len(), 1);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(cache.is_empty());
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_task() {
        let cache = Arc::new(ResponseCache::default());
        let handle = ExpirySweeper::new(&cache)
            .with_interval(Duration::from_secs(1))
            .spawn();
        handle.shutdown();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_exits_when_cache_dropped() {
        let cache = Arc::new(ResponseCache::default());
        let handle = ExpirySweeper::new(&cache)
            .with_interval(Duration::from_secs(1))
            .spawn();
        drop(cache);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
    }
}
