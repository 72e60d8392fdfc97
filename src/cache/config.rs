//! Cache configuration.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_SWEEP_INTERVAL_MS: u64 = 5 * 60 * 1000;
const DEFAULT_MAX_ENTRY_SIZE: usize = 10 * 1024 * 1024;

/// Shortest sweep period a cache accepts.
pub(crate) const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, every lookup misses and writes are dropped.
    pub enabled: bool,
    /// Period of the background expiry sweep, in milliseconds. At least 1000.
    pub sweep_interval_ms: u64,
    /// Serialized payloads above this many bytes are not cached.
    pub max_entry_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_max_entry_size(mut self, bytes: usize) -> Self {
        self.max_entry_size = bytes;
        self
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    /// Defaults overridden by `AI_CACHE_ENABLED`, `AI_CACHE_SWEEP_INTERVAL_SECS`
    /// and `AI_CACHE_MAX_ENTRY_BYTES`. Unparseable values are ignored.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(enabled) = env_override::<bool>("AI_CACHE_ENABLED") {
            cfg.enabled = enabled;
        }
        if let Some(secs) = env_override::<u64>("AI_CACHE_SWEEP_INTERVAL_SECS") {
            cfg.sweep_interval_ms = secs.saturating_mul(1000);
        }
        if let Some(bytes) = env_override::<usize>("AI_CACHE_MAX_ENTRY_BYTES") {
            cfg.max_entry_size = bytes;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                "invalid cache configuration",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("cache_config"),
            )
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sweep_interval() < MIN_SWEEP_INTERVAL {
            return Err(Error::configuration_with_context(
                "sweep interval must be at least 1s",
                ErrorContext::new()
                    .with_field_path("sweep_interval_ms")
                    .with_details(format!("got {}ms", self.sweep_interval_ms))
                    .with_source("cache_config"),
            ));
        }
        Ok(())
    }
}

fn env_override<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparseable cache setting");
            None
        }
    }
}
