//! Environment overrides for `CacheConfig`. Kept in its own test binary
//! because it mutates process environment.

use creator_ai_cache::{CacheConfig, Error};
use std::time::Duration;

#[test]
fn test_env_overrides() {
    std::env::set_var("AI_CACHE_ENABLED", "false");
    std::env::set_var("AI_CACHE_SWEEP_INTERVAL_SECS", "60");
    std::env::set_var("AI_CACHE_MAX_ENTRY_BYTES", "not-a-number");

    let cfg = CacheConfig::from_env().unwrap();
    assert!(!cfg.enabled);
    assert_eq!(cfg.sweep_interval(), Duration::from_secs(60));
    assert_eq!(cfg.max_entry_size, CacheConfig::default().max_entry_size);

    std::env::set_var("AI_CACHE_SWEEP_INTERVAL_SECS", "0");
    let err = CacheConfig::from_env().unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    for var in [
        "AI_CACHE_ENABLED",
        "AI_CACHE_SWEEP_INTERVAL_SECS",
        "AI_CACHE_MAX_ENTRY_BYTES",
    ] {
        std::env::remove_var(var);
    }
    assert_eq!(CacheConfig::from_env().unwrap(), CacheConfig::default());
}
