//! Usage accounting.

use serde::{Deserialize, Serialize};

/// Approximate upstream price per token, used for the cost-saved estimate.
pub const COST_PER_TOKEN_USD: f64 = 0.00015;

/// Raw counters, updated under the cache lock.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counters {
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) total_requests: u64,
    pub(crate) tokens_saved: u64,
}

impl Counters {
    pub(crate) fn record_hit(&mut self, tokens: u64) {
        self.total_requests += 1;
        self.hits += 1;
        self.tokens_saved += tokens;
    }

    pub(crate) fn record_miss(&mut self) {
        self.total_requests += 1;
        self.misses += 1;
    }

    pub(crate) fn snapshot(&self, cache_size: usize) -> CacheStatsSnapshot {
        let hit_rate = if self.total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_requests as f64
        };
        CacheStatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            total_requests: self.total_requests,
            hit_rate,
            cache_size,
            estimated_tokens_saved: self.tokens_saved,
            estimated_cost_saved: self.tokens_saved as f64 * COST_PER_TOKEN_USD,
        }
    }
}

/// Point-in-time view of cache usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    /// `hits / total_requests`, or 0.0 before any request.
    pub hit_rate: f64,
    /// Entries physically held, including expired ones not yet reclaimed.
    pub cache_size: usize,
    pub estimated_tokens_saved: u64,
    /// USD, from [`COST_PER_TOKEN_USD`].
    pub estimated_cost_saved: f64,
}

impl CacheStatsSnapshot {
    /// Hit rate rendered with one decimal, e.g. `"66.7%"`.
    pub fn hit_rate_percent(&self) -> String {
        format!("{:.1}%", self.hit_rate * 100.0)
    }
}
