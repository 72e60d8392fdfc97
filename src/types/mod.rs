//! 类型模块：定义各类 AI 请求参数与响应载荷。
//!
//! # Types Module
//!
//! Request parameters and response payloads for each cached AI operation.
//! Field names serialize in camelCase and absent optional fields are omitted,
//! so two requests that carry the same information produce the same cache key.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TrendDiscoveryRequest`] | Platform, category and audience filter for trend ideas |
//! | [`TrendResult`] | One trending content idea |
//! | [`ContentAnalysisRequest`] | Title/thumbnail under review |
//! | [`ContentAnalysisResult`] | Scores, feedback and suggestions |
//! | [`VideoClipRequest`] | Source video to cut into clips |
//! | [`VideoClipSuggestion`] | One suggested clip |

pub mod content;
pub mod trend;
pub mod video;

pub use content::{ContentAnalysisRequest, ContentAnalysisResult, ContentFeedback};
pub use trend::{Hotness, Platform, TrendDiscoveryRequest, TrendResult};
pub use video::{VideoClipRequest, VideoClipSuggestion};
