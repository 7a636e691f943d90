// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Engines used when no config file overrides them.
pub const DEFAULT_ENGINES: &[&str] = &["google", "bing", "duckduckgo"];

pub fn default_engines() -> Vec<String> {
    DEFAULT_ENGINES.iter().map(|s| s.to_string()).collect()
}

/// Load the engine list from an explicit path. Supports TOML or JSON.
pub fn load_engines_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading engine list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_engines(&content, ext.as_str())
}

fn parse_engines(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    // Try TOML first if hinted or content looks like toml.
    let try_toml = hint_ext == "toml" || s.contains("engines");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    // Try JSON array
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    // Fallback: also try TOML if not attempted
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported engine list format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlEngines {
        engines: Vec<String>,
    }
    let v: TomlEngines = toml::from_str(s)?;
    Ok(clean_list(v.engines))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim().to_ascii_lowercase();
        if !t.is_empty() {
            set.insert(t);
        }
    }
    set.into_iter().collect()
}
