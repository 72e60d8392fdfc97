//! In-memory entry store.

use super::kind::CacheKind;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub(crate) data: Vec<u8>,
    pub(crate) created_at: Instant,
    pub(crate) expires_at: Instant,
    pub(crate) hit_count: u64,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration, now: Instant) -> Self {
        Self {
            data,
            created_at: now,
            expires_at: now + ttl,
            hit_count: 0,
        }
    }

    /// Visible only while `now < expires_at`.
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of a store lookup.
pub(crate) enum Lookup<'a> {
    Live(&'a mut CacheEntry),
    Expired,
    Absent,
}

/// Map from full key string to entry. Not synchronized; the owning
/// `ResponseCache` serializes access.
#[derive(Debug, Default)]
pub(crate) struct EntryStore {
    entries: HashMap<String, CacheEntry>,
}

impl EntryStore {
    /// Look up `key`, physically removing it if it has expired.
    pub(crate) fn lookup(&mut self, key: &str, now: Instant) -> Lookup<'_> {
        let expired = match self.entries.get(key) {
            None => return Lookup::Absent,
            Some(entry) => entry.is_expired(now),
        };
        if expired {
            self.entries.remove(key);
            return Lookup::Expired;
        }
        match self.entries.get_mut(key) {
            Some(entry) => Lookup::Live(entry),
            None => Lookup::Absent,
        }
    }

    pub(crate) fn insert(&mut self, key: String, data: Vec<u8>, ttl: Duration, now: Instant) {
        self.entries.insert(key, CacheEntry::new(data, ttl, now));
    }

    pub(crate) fn remove_kind(&mut self, kind: &CacheKind) -> usize {
        let prefix = kind.key_prefix();
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(&prefix));
        before - self.entries.len()
    }

    pub(crate) fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
