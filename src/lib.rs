//! # creator-ai-cache
//!
//! 面向内容创作助手的 AI 响应缓存：规范化请求参数、按类型设置 TTL 并统计节省的 Token。
//!
//! Read-through response cache for the AI calls behind a content-creator
//! assistant: trend discovery, title/thumbnail analysis and video clip
//! suggestions.
//!
//! ## Overview
//!
//! Upstream language-model calls are slow and billed per token. Requests for
//! trends or content analysis repeat often with only incidental differences
//! (casing, key order, array order). This crate canonicalizes request
//! parameters into a stable key, keeps responses in memory for a per-type TTL
//! and reports how many tokens the cache avoided.
//!
//! ## Key Features
//!
//! - **Key normalization**: [`cache::normalize`] folds case, trims strings and
//!   sorts keys and arrays before hashing
//! - **Per-type TTL**: [`CacheKind`] fixes TTL and token estimate for each
//!   request type
//! - **Typed access**: [`cache::ResponseKind`] ties each type tag to its
//!   parameter and payload types
//! - **Background reclaim**: [`cache::ExpirySweeper`] periodically drops
//!   expired entries
//! - **Accounting**: [`CacheStatsSnapshot`] exposes hits, misses, hit rate and
//!   estimated savings
//!
//! ## Quick Start
//!
//! ```rust
//! use creator_ai_cache::{CacheConfig, CacheKind, ResponseCache};
//! use serde_json::json;
//!
//! # fn main() -> creator_ai_cache::Result<()> {
//! let cache = ResponseCache::new(CacheConfig::default())?;
//!
//! let params = json!({ "title": "Hello", "platform": "youtube" });
//! cache.set(&CacheKind::Content, &params, &json!({ "score": 8 }))?;
//!
//! let lookup = json!({ "platform": "YouTube", "title": "hello" });
//! let hit: Option<serde_json::Value> = cache.get(&CacheKind::Content, &lookup)?;
//! assert_eq!(hit, Some(json!({ "score": 8 })));
//! assert_eq!(cache.stats().hits, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Normalizer, key generation, store, sweeper and accounting |
//! | [`types`] | Request and response shapes for each cached AI operation |
//! | [`error`] | Crate-wide error type |

pub mod cache;
pub mod types;

// Re-export main types for convenience
pub use cache::{
    CacheConfig, CacheKey, CacheKind, CacheStatsSnapshot, ExpirySweeper, ResponseCache,
    SweeperHandle,
};
pub use types::{
    ContentAnalysisRequest, ContentAnalysisResult, TrendDiscoveryRequest, TrendResult,
    VideoClipRequest, VideoClipSuggestion,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
