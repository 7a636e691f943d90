// src/ingest/providers/serpapi.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::types::{ProviderHit, SearchProvider};

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// SerpApi-backed provider; one instance per engine. The API key comes in
/// through configuration, never from ambient environment.
pub struct SerpApiProvider {
    http: reqwest::Client,
    api_key: String,
    engine: String,
    num_results: u32,
}

impl SerpApiProvider {
    pub fn new(api_key: impl Into<String>, engine: impl Into<String>, num_results: u32) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("perspective-engine/0.1 (+github.com/lumlich/perspective-engine)")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: api_key.into(),
            engine: engine.into().to_ascii_lowercase(),
            num_results,
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn search(&self, query: &str) -> Result<Vec<ProviderHit>> {
        anyhow::ensure!(!self.api_key.is_empty(), "serpapi key missing");

        let num = self.num_results.to_string();
        let params = [
            ("q", query),
            ("engine", self.engine.as_str()),
            ("api_key", self.api_key.as_str()),
            ("num", num.as_str()),
            ("hl", "en"),
            ("gl", "us"),
        ];

        let resp = self
            .http
            .get("https://serpapi.com/search")
            .query(&params)
            .send()
            .await
            .context("serpapi request")?;
        anyhow::ensure!(
            resp.status().is_success(),
            "serpapi returned {}",
            resp.status()
        );

        let body: SerpResponse = resp.json().await.context("serpapi response body")?;
        let hits: Vec<ProviderHit> = body
            .organic_results
            .into_iter()
            .filter_map(|r| {
                let link = r.link?;
                Some(ProviderHit {
                    title: r.title.unwrap_or_else(|| "No title".to_string()),
                    link,
                    snippet: r.snippet.unwrap_or_default(),
                })
            })
            .collect();

        Ok(hits)
    }

    fn engine(&self) -> &str {
        &self.engine
    }
}
