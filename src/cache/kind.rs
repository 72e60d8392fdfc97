//! Request type tags and their fixed TTL / token estimate table.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const TTL_TRENDS: Duration = Duration::from_secs(15 * 60);
const TTL_CONTENT_ANALYSIS: Duration = Duration::from_secs(60 * 60);
const TTL_DEFAULT: Duration = Duration::from_secs(30 * 60);

const TOKENS_TREND_DISCOVERY: u64 = 500;
const TOKENS_CONTENT_ANALYSIS: u64 = 300;
const TOKENS_VIDEO_PROCESSING: u64 = 800;
const TOKENS_DEFAULT: u64 = 200;

/// Separates the type tag from the digest in a key.
const KEY_SEPARATOR: char = ':';

/// The type tag a cached response is stored under.
///
/// The tag selects the entry TTL and the token estimate credited on a hit,
/// and prefixes every key so entries can be cleared per type. Tags are built
/// with [`CacheKind::parse`] (or `str::parse`), which maps the known names to
/// their variants, so an [`CacheKind::Other`] never shadows one of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CacheKind {
    /// Trend discovery results (`"trends"`).
    Trends,
    /// Title/thumbnail analysis results (`"content"`).
    Content,
    /// Video clip suggestions (`"videoProcessing"`).
    VideoProcessing,
    /// Any other tag; uses the default TTL and token estimate.
    Other(CustomTag),
}

/// A tag outside the known set. Never empty, never one of the known names
/// and never contains `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomTag(String);

impl CustomTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CacheKind {
    /// Parse a type tag.
    ///
    /// Known names are case-sensitive (`"Trends"` is a custom tag). Empty tags
    /// and tags containing `:` are rejected, since either would let one type's
    /// key prefix match another's keys.
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "trends" => Ok(CacheKind::Trends),
            "content" => Ok(CacheKind::Content),
            "videoProcessing" => Ok(CacheKind::VideoProcessing),
            "" => Err(invalid_tag(tag, "type tag must not be empty")),
            other if other.contains(KEY_SEPARATOR) => Err(invalid_tag(
                tag,
                "type tag must not contain ':'",
            )),
            other => Ok(CacheKind::Other(CustomTag(other.to_string()))),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CacheKind::Trends => "trends",
            CacheKind::Content => "content",
            CacheKind::VideoProcessing => "videoProcessing",
            CacheKind::Other(tag) => tag.as_str(),
        }
    }

    /// Time-to-live for entries of this type.
    pub fn ttl(&self) -> Duration {
        match self {
            CacheKind::Trends => TTL_TRENDS,
            CacheKind::Content => TTL_CONTENT_ANALYSIS,
            CacheKind::VideoProcessing | CacheKind::Other(_) => TTL_DEFAULT,
        }
    }

    /// Approximate upstream tokens avoided by one cache hit.
    pub fn token_estimate(&self) -> u64 {
        match self {
            CacheKind::Trends => TOKENS_TREND_DISCOVERY,
            CacheKind::Content => TOKENS_CONTENT_ANALYSIS,
            CacheKind::VideoProcessing => TOKENS_VIDEO_PROCESSING,
            CacheKind::Other(_) => TOKENS_DEFAULT,
        }
    }

    /// Prefix shared by every key of this type.
    pub fn key_prefix(&self) -> String {
        format!("{}{}", self.as_str(), KEY_SEPARATOR)
    }
}

fn invalid_tag(tag: &str, msg: &str) -> Error {
    Error::validation_with_context(
        msg,
        ErrorContext::new()
            .with_field_path("type")
            .with_details(format!("got {:?}", tag)),
    )
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CacheKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        CacheKind::parse(tag)
    }
}

impl TryFrom<String> for CacheKind {
    type Error = Error;

    fn try_from(tag: String) -> Result<Self> {
        CacheKind::parse(&tag)
    }
}

impl From<CacheKind> for String {
    fn from(kind: CacheKind) -> Self {
        kind.as_str().to_string()
    }
}
