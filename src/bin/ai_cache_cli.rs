//! ai-cache-cli — 缓存键检查与流量回放工具
//!
//! Usage:
//!   ai-cache-cli key <type> <params-json>            Show normalized params and cache key
//!   ai-cache-cli replay <file.jsonl> [--config <yaml>]  Replay recorded cache operations
//!   ai-cache-cli version                             Show version information

use anyhow::{bail, Context};
use creator_ai_cache::cache::normalize;
use creator_ai_cache::{CacheConfig, CacheKey, CacheKind, ResponseCache};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "key" => cmd_key(&args[2..]),
        "replay" => cmd_replay(&args[2..]),
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"ai-cache-cli — AI response cache tooling

USAGE:
    ai-cache-cli <COMMAND> [OPTIONS]

COMMANDS:
    key <type> <params-json>            Show normalized params and the cache key
    replay <file.jsonl> [--config <p>]  Replay recorded operations and print stats
    version                             Show version information
    help                                Show this help message

REPLAY FORMAT (one JSON object per line):
    {{"op":"get","type":"trends","params":{{...}}}}
    {{"op":"set","type":"trends","params":{{...}},"data":...}}
    {{"op":"clear_type","type":"trends"}}
    {{"op":"clear"}}

ENVIRONMENT:
    AI_CACHE_ENABLED                Enable or disable caching (true/false)
    AI_CACHE_SWEEP_INTERVAL_SECS    Expiry sweep period in seconds (at least 1)
    AI_CACHE_MAX_ENTRY_BYTES        Largest payload that will be cached
    RUST_LOG                        Log filter (default: warn)"#
    );
}

fn cmd_version() {
    println!("ai-cache-cli {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_key(args: &[String]) -> anyhow::Result<()> {
    let (Some(tag), Some(raw)) = (args.first(), args.get(1)) else {
        bail!("usage: ai-cache-cli key <type> <params-json>");
    };
    let params: Value = serde_json::from_str(raw).context("params must be valid JSON")?;
    let kind: CacheKind = tag.parse()?;
    let key = CacheKey::from_value(&kind, &params);

    println!("type:       {kind}");
    println!("ttl:        {}m", kind.ttl().as_secs() / 60);
    println!("normalized: {}", normalize(&params));
    println!("key:        {key}");
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ReplayOp {
    Get {
        #[serde(rename = "type")]
        kind: CacheKind,
        #[serde(default)]
        params: Value,
    },
    Set {
        #[serde(rename = "type")]
        kind: CacheKind,
        #[serde(default)]
        params: Value,
        data: Value,
    },
    ClearType {
        #[serde(rename = "type")]
        kind: CacheKind,
    },
    Clear,
}

fn cmd_replay(args: &[String]) -> anyhow::Result<()> {
    let Some(file) = args.first() else {
        bail!("usage: ai-cache-cli replay <file.jsonl> [--config <yaml>]");
    };
    let config = match flag_value(args, "--config") {
        Some(path) => CacheConfig::from_yaml_file(path)
            .with_context(|| format!("loading config from {path}"))?,
        None => CacheConfig::from_env()?,
    };
    let cache = ResponseCache::new(config)?;
    replay_file(&cache, Path::new(file))?;

    let stats = cache.stats();
    println!();
    println!("hit rate: {}", stats.hit_rate_percent());
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn replay_file(cache: &ResponseCache, path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = idx + 1;
        let op: ReplayOp =
            serde_json::from_str(line).with_context(|| format!("line {lineno}: bad operation"))?;
        match op {
            ReplayOp::Get { kind, params } => {
                let hit: Option<Value> = cache.get(&kind, &params)?;
                let outcome = if hit.is_some() { "HIT" } else { "MISS" };
                println!("{lineno:>5}  get   {kind:<16} {outcome}");
            }
            ReplayOp::Set { kind, params, data } => {
                cache.set(&kind, &params, &data)?;
                println!("{lineno:>5}  set   {kind}");
            }
            ReplayOp::ClearType { kind } => {
                let removed = cache.clear_by_type(&kind);
                println!("{lineno:>5}  clear {kind} ({removed} removed)");
            }
            ReplayOp::Clear => {
                cache.clear();
                println!("{lineno:>5}  clear all");
            }
        }
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn write_replay(name: &str, lines: &[&str]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "ai-cache-cli-{}-{}.jsonl",
            std::process::id(),
            name
        ));
        std::fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    #[test]
    fn test_replay_op_variants() {
        let op: ReplayOp =
            serde_json::from_str(r#"{"op":"get","type":"trends","params":{"a":1}}"#).unwrap();
        assert!(matches!(
            op,
            ReplayOp::Get { kind: CacheKind::Trends, ref params } if params == &json!({ "a": 1 })
        ));

        let op: ReplayOp =
            serde_json::from_str(r#"{"op":"set","type":"content","data":[1,2]}"#).unwrap();
        match op {
            ReplayOp::Set { kind, params, data } => {
                assert_eq!(kind, CacheKind::Content);
                assert_eq!(params, Value::Null);
                assert_eq!(data, json!([1, 2]));
            }
            other => panic!("unexpected op: {:?}", other),
        }

        let op: ReplayOp =
            serde_json::from_str(r#"{"op":"clear_type","type":"videoProcessing"}"#).unwrap();
        assert!(matches!(
            op,
            ReplayOp::ClearType {
                kind: CacheKind::VideoProcessing
            }
        ));

        let op: ReplayOp = serde_json::from_str(r#"{"op":"clear"}"#).unwrap();
        assert!(matches!(op, ReplayOp::Clear));
    }

    #[test]
    fn test_replay_op_rejects_unknown_and_bad_tags() {
        assert!(serde_json::from_str::<ReplayOp>(r#"{"op":"cleartype","type":"trends"}"#).is_err());
        assert!(serde_json::from_str::<ReplayOp>(r#"{"op":"get","type":"a:b"}"#).is_err());
        assert!(serde_json::from_str::<ReplayOp>(r#"{"op":"set","type":"trends"}"#).is_err());
    }

    #[test]
    fn test_replay_file_updates_stats() {
        let path = write_replay(
            "stats",
            &[
                "# recorded traffic",
                r#"{"op":"set","type":"trends","params":{"platform":"tiktok"},"data":["dance"]}"#,
                r#"{"op":"get","type":"trends","params":{"platform":"TikTok "}}"#,
                "",
                r#"{"op":"get","type":"content","params":{"title":"intro"}}"#,
                r#"{"op":"set","type":"content","params":{"title":"intro"},"data":{"score":7}}"#,
                r#"{"op":"clear_type","type":"content"}"#,
                r#"{"op":"get","type":"content","params":{"title":"intro"}}"#,
            ],
        );
        let cache = ResponseCache::default();
        replay_file(&cache, &path).unwrap();

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.cache_size, 1);
        assert_eq!(stats.estimated_tokens_saved, 500);

        let clear = write_replay("clear", &[r#"{"op":"clear"}"#]);
        replay_file(&cache, &clear).unwrap();
        let stats = cache.stats();
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.cache_size, 0);

        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(clear);
    }

    #[test]
    fn test_replay_file_reports_bad_line() {
        let path = write_replay(
            "bad",
            &[r#"{"op":"clear"}"#, "# skipped", r#"{"op":"evict"}"#],
        );
        let err = replay_file(&ResponseCache::default(), &path).unwrap_err();
        assert!(format!("{err:#}").starts_with("line 3: bad operation"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_flag_value() {
        let args: Vec<String> = ["traffic.jsonl", "--config", "cache.yaml"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(flag_value(&args, "--config"), Some("cache.yaml"));
        assert_eq!(flag_value(&args, "--missing"), None);
        assert_eq!(flag_value(&args[..2], "--config"), None);
    }
}
