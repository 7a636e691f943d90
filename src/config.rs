// src/config.rs
//! Explicit pipeline configuration, injected into the entry points.
//!
//! The classification/scoring core never reads ambient environment; the
//! one concession is the `"ENV"` api-key indirection, resolved here at
//! config-load time so secrets can stay out of the file.

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

use crate::analyze::weights::ScoringConfig;
use crate::ingest::config::default_engines;

fn default_provider() -> String {
    "openai".to_string()
}
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_timeout_secs() -> u64 {
    20
}
fn default_batch_max() -> usize {
    15
}
fn default_results_per_engine() -> u32 {
    15
}
fn default_include_fringe() -> bool {
    true
}

/// AI collaborator settings (perspective batches + fact-check verdicts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: bool,
    /// "openai" (anything else resolves to a disabled client)
    #[serde(default = "default_provider")]
    pub provider: String,
    /// "ENV" means: read from OPENAI_API_KEY at load time.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Hard timeout for one batch call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Max hits submitted in one classification request.
    #[serde(default = "default_batch_max")]
    pub batch_max: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            batch_max: default_batch_max(),
        }
    }
}

/// Search fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_engines")]
    pub engines: Vec<String>,
    #[serde(default = "default_results_per_engine")]
    pub results_per_engine: u32,
    /// Whether to run the fringe query variant alongside the broad one.
    #[serde(default = "default_include_fringe")]
    pub include_fringe: bool,
    /// Provider credential, injected rather than read from environment.
    #[serde(default)]
    pub serpapi_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engines: default_engines(),
            results_per_engine: default_results_per_engine(),
            include_fringe: default_include_fringe(),
            serpapi_key: String::new(),
        }
    }
}

/// Everything the pipeline needs, in one injected object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl PipelineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: PipelineConfig = serde_json::from_str(&data)?;

        // Normalize provider
        cfg.ai.provider = cfg.ai.provider.to_lowercase();

        // Resolve api keys if "ENV"
        if cfg.ai.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.ai.api_key = env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("Missing OPENAI_API_KEY env var"))?;
        }
        if cfg.search.serpapi_key.trim().eq_ignore_ascii_case("env") {
            cfg.search.serpapi_key = env::var("SERPAPI_KEY")
                .map_err(|_| anyhow::anyhow!("Missing SERPAPI_KEY env var"))?;
        }

        // Sanitize limits
        if cfg.ai.batch_max == 0 {
            cfg.ai.batch_max = default_batch_max();
        }
        if cfg.ai.timeout_secs == 0 {
            cfg.ai.timeout_secs = default_timeout_secs();
        }
        if cfg.search.results_per_engine == 0 {
            cfg.search.results_per_engine = default_results_per_engine();
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = PipelineConfig::default();
        assert!(!cfg.ai.enabled);
        assert_eq!(cfg.ai.batch_max, 15);
        assert_eq!(cfg.search.engines, vec!["google", "bing", "duckduckgo"]);
        assert!(cfg.search.include_fringe);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PipelineConfig =
            serde_json::from_str(r#"{"ai": {"enabled": true, "api_key": "k"}}"#).unwrap();
        assert!(cfg.ai.enabled);
        assert_eq!(cfg.ai.model, "gpt-3.5-turbo");
        assert_eq!(cfg.search.results_per_engine, 15);
        assert_eq!(cfg.scoring.base_trust_max, 60.0);
    }
}
