//! Typed access to cached responses.

use super::key::CacheKey;
use super::kind::CacheKind;
use super::manager::ResponseCache;
use crate::types::{
    ContentAnalysisRequest, ContentAnalysisResult, TrendDiscoveryRequest, TrendResult,
    VideoClipRequest, VideoClipSuggestion,
};
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use tracing::debug;

/// Binds a cache type tag to the parameter and payload types stored under it.
pub trait ResponseKind {
    type Params: Serialize;
    type Payload: Serialize + DeserializeOwned;

    fn kind() -> CacheKind;
}

/// `"trends"`: trend ideas for a platform/category/audience.
pub struct TrendDiscovery;

impl ResponseKind for TrendDiscovery {
    type Params = TrendDiscoveryRequest;
    type Payload = Vec<TrendResult>;

    fn kind() -> CacheKind {
        CacheKind::Trends
    }
}

/// `"content"`: title and thumbnail analysis.
pub struct ContentAnalysis;

impl ResponseKind for ContentAnalysis {
    type Params = ContentAnalysisRequest;
    type Payload = ContentAnalysisResult;

    fn kind() -> CacheKind {
        CacheKind::Content
    }
}

/// `"videoProcessing"`: clip suggestions for a long-form video.
pub struct VideoProcessing;

impl ResponseKind for VideoProcessing {
    type Params = VideoClipRequest;
    type Payload = Vec<VideoClipSuggestion>;

    fn kind() -> CacheKind {
        CacheKind::VideoProcessing
    }
}

impl ResponseCache {
    pub fn lookup<K: ResponseKind>(&self, params: &K::Params) -> Result<Option<K::Payload>> {
        self.get(&K::kind(), params)
    }

    pub fn store<K: ResponseKind>(&self, params: &K::Params, payload: &K::Payload) -> Result<()> {
        self.set(&K::kind(), params, payload)
    }

    /// Read-through lookup.
    ///
    /// On a hit returns the cached payload. On a miss awaits `fetch`, caches
    /// its result and returns it. Upstream errors are returned as-is and
    /// nothing is cached.
    pub async fn get_or_fetch<K, F, Fut, E>(
        &self,
        params: &K::Params,
        fetch: F,
    ) -> std::result::Result<K::Payload, E>
    where
        K: ResponseKind,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<K::Payload, E>>,
        E: From<Error>,
    {
        let key = CacheKey::generate(&K::kind(), params)?;
        if let Some(hit) = self.get_by_key(&key) {
            return Ok(hit);
        }
        debug!(kind = %key.kind, "fetching from upstream");
        let payload = fetch().await?;
        self.set_by_key(&key, &payload)?;
        Ok(payload)
    }
}
