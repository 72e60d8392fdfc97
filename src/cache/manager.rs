//! Cache manager.

use super::config::CacheConfig;
use super::key::CacheKey;
use super::kind::CacheKind;
use super::stats::{CacheStatsSnapshot, Counters};
use super::store::{EntryStore, Lookup};
use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Inner {
    store: EntryStore,
    counters: Counters,
}

/// Process-local response cache.
///
/// Owned by the application's composition root and shared with request
/// handlers through an `Arc`. Every operation runs to completion under one
/// lock, so the counters always satisfy `hits + misses == total_requests`.
#[derive(Debug)]
pub struct ResponseCache {
    config: CacheConfig,
    inner: Mutex<Inner>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_valid_config(CacheConfig::default())
    }
}

impl ResponseCache {
    /// Build a cache after checking `config`; a sweep interval under one
    /// second is rejected.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CacheConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Look up the payload cached for `params` under `kind`.
    ///
    /// Returns `Ok(None)` on a miss. Expired entries are removed as a side
    /// effect. The only error is `params` failing to serialize, in which case
    /// no counter is touched.
    pub fn get<T, P>(&self, kind: &CacheKind, params: &P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let key = CacheKey::generate(kind, params)?;
        Ok(self.get_by_key(&key))
    }

    /// Store `payload` for `params` under `kind`, replacing any previous entry.
    pub fn set<T, P>(&self, kind: &CacheKind, params: &P, payload: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        let key = CacheKey::generate(kind, params)?;
        self.set_by_key(&key, payload)
    }

    /// [`ResponseCache::get`] with the key scoped to `user_id` when given.
    pub fn get_with_user_context<T, P>(
        &self,
        kind: &CacheKind,
        params: &P,
        user_id: Option<&str>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let key = CacheKey::generate_for_user(kind, params, user_id)?;
        Ok(self.get_by_key(&key))
    }

    /// [`ResponseCache::set`] with the key scoped to `user_id` when given.
    pub fn set_with_user_context<T, P>(
        &self,
        kind: &CacheKind,
        params: &P,
        payload: &T,
        user_id: Option<&str>,
    ) -> Result<()>
    where
        T: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        let key = CacheKey::generate_for_user(kind, params, user_id)?;
        self.set_by_key(&key, payload)
    }

    pub fn get_by_key<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let mut inner = self.lock();
        let Inner { store, counters } = &mut *inner;

        if !self.config.enabled {
            counters.record_miss();
            return None;
        }

        let full_key = key.as_string();
        let now = Instant::now();
        match store.lookup(&full_key, now) {
            Lookup::Live(entry) => match serde_json::from_slice::<T>(&entry.data) {
                Ok(value) => {
                    entry.hit_count += 1;
                    let tokens = key.kind.token_estimate();
                    counters.record_hit(tokens);
                    debug!(
                        kind = %key.kind,
                        key = %full_key,
                        tokens,
                        hit_count = entry.hit_count,
                        age_secs = now.duration_since(entry.created_at).as_secs(),
                        "cache hit"
                    );
                    Some(value)
                }
                Err(e) => {
                    counters.record_miss();
                    warn!(kind = %key.kind, key = %full_key, error = %e, "cached payload has unexpected shape");
                    None
                }
            },
            Lookup::Expired => {
                counters.record_miss();
                debug!(kind = %key.kind, key = %full_key, "cache miss (expired)");
                None
            }
            Lookup::Absent => {
                counters.record_miss();
                debug!(kind = %key.kind, key = %full_key, "cache miss");
                None
            }
        }
    }

    pub fn set_by_key<T: Serialize + ?Sized>(&self, key: &CacheKey, payload: &T) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }
        let data = serde_json::to_vec(payload)?;
        if data.len() > self.config.max_entry_size {
            debug!(
                kind = %key.kind,
                size = data.len(),
                limit = self.config.max_entry_size,
                "payload too large to cache"
            );
            return Ok(());
        }
        let ttl = key.kind.ttl();
        let full_key = key.as_string();
        debug!(kind = %key.kind, key = %full_key, ttl_secs = ttl.as_secs(), "cached response");
        self.lock().store.insert(full_key, data, ttl, Instant::now());
        Ok(())
    }

    /// Remove every entry stored under `kind`. Counters are untouched.
    pub fn clear_by_type(&self, kind: &CacheKind) -> usize {
        let removed = self.lock().store.remove_kind(kind);
        debug!(kind = %kind, removed, "cleared cache entries by type");
        removed
    }

    /// Remove all entries and reset every counter to zero.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.store.clear();
        inner.counters = Counters::default();
        debug!("cache cleared");
    }

    /// Physically remove expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let removed = self.lock().store.purge_expired(Instant::now());
        if removed > 0 {
            debug!(removed, "purged expired cache entries");
        }
        removed
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        let inner = self.lock();
        inner.counters.snapshot(inner.store.len())
    }

    /// Entries physically held, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Operations never panic mid-update, so a poisoned lock still guards a
    // consistent store.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
