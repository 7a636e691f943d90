// src/ingest/providers/mod.rs
pub mod serpapi;

pub use serpapi::SerpApiProvider;

use crate::config::SearchConfig;
use crate::ingest::types::SearchProvider;

/// One SerpApi-backed provider per configured engine.
pub fn build_providers_from_config(cfg: &SearchConfig) -> Vec<Box<dyn SearchProvider>> {
    cfg.engines
        .iter()
        .map(|engine| {
            Box::new(SerpApiProvider::new(
                cfg.serpapi_key.clone(),
                engine.clone(),
                cfg.results_per_engine,
            )) as Box<dyn SearchProvider>
        })
        .collect()
}
