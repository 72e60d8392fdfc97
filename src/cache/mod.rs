//! 响应缓存模块：按规范化参数缓存 AI 响应，按类型过期。
//!
//! # AI Response Cache Module
//!
//! In-memory cache for language-model responses, keyed by normalized request
//! parameters and expired by a per-type TTL.
//!
//! ## Overview
//!
//! Caching is valuable for:
//! - Reducing API costs by avoiding duplicate upstream calls
//! - Improving latency for repeated trend and analysis requests
//! - Estimating how many tokens were saved
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`ResponseCache`] | Cache manager: lookup, store, clearing and accounting |
//! | [`CacheConfig`] | Enablement, sweep interval and entry size limit |
//! | [`CacheKind`] | Request type tag with its TTL and token estimate |
//! | [`CacheKey`] | Key derived from type tag and normalized params |
//! | [`normalize`] | Parameter canonicalization used before hashing |
//! | [`ExpirySweeper`] | Background task that reclaims expired entries |
//! | [`ResponseKind`] | Typed binding of a type tag to params and payload |
//!
//! ## Example
//!
//! ```rust
//! use creator_ai_cache::cache::{CacheConfig, CacheKind, ResponseCache};
//! use serde_json::json;
//!
//! let cache = ResponseCache::new(CacheConfig::default()).unwrap();
//! let params = json!({ "platform": "tiktok", "category": "Fitness" });
//!
//! let miss: Option<serde_json::Value> = cache.get(&CacheKind::Trends, &params).unwrap();
//! assert!(miss.is_none());
//!
//! cache.set(&CacheKind::Trends, &params, &json!(["trend"])).unwrap();
//! assert_eq!(cache.stats().misses, 1);
//! ```
//!
//! ## Cache Key Generation
//!
//! Keys are `"{type}:{digest}"` where the digest is the first 16 hex chars of
//! the SHA-256 of the normalized params rendered as compact JSON. Requests
//! that differ only in string case, surrounding whitespace, key order or array
//! order share a key.

mod config;
mod key;
mod kind;
mod manager;
mod normalize;
mod stats;
mod store;
mod sweeper;
mod typed;

pub use config::CacheConfig;
pub use key::CacheKey;
pub use kind::{CacheKind, CustomTag};
pub use manager::ResponseCache;
pub use normalize::normalize;
pub use stats::{CacheStatsSnapshot, COST_PER_TOKEN_USD};
pub use sweeper::{ExpirySweeper, SweeperHandle};
pub use typed::{ContentAnalysis, ResponseKind, TrendDiscovery, VideoProcessing};
