// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Which of the two query formulations produced a hit.
///
/// `Broad` is the user's query as-is; `Fringe` is the diversification
/// variant that pulls in forums, independent outlets and contrarian takes
/// the broad query would bury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryVariant {
    Broad,
    Fringe,
}

/// Sites the fringe variant excludes so its result slots go to
/// non-mainstream sources (the broad variant already covers these).
const FRINGE_EXCLUDED_SITES: &[&str] = &[
    "wikipedia.org",
    "britannica.com",
    "*.gov",
    "*.mil",
    "who.int",
    "nih.gov",
    "cdc.gov",
    "*.edu",
    "*.un.org",
    "apnews.com",
    "reuters.com",
    "bbc.com",
    "cnn.com",
    "nytimes.com",
    "washingtonpost.com",
    "theguardian.com",
    "wsj.com",
    "npr.org",
];

impl QueryVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryVariant::Broad => "broad",
            QueryVariant::Fringe => "fringe",
        }
    }

    /// Expand the user's query into the concrete engine query for this
    /// variant. Broad passes the query through; fringe appends
    /// divergent-source operators and excludes mainstream reference sites.
    pub fn expand(&self, query: &str) -> String {
        match self {
            QueryVariant::Broad => query.to_string(),
            QueryVariant::Fringe => {
                let mut q = format!(
                    "{query} (forum OR discussion OR \"alternative take\" OR \
                     \"uncensored views\" OR \"independent report\" OR blog OR \
                     \"citizen journalist\" OR \"controversial study\" OR \
                     \"hidden truth\" OR \"unconventional analysis\")"
                );
                for site in FRINGE_EXCLUDED_SITES {
                    q.push_str(" -site:");
                    q.push_str(site);
                }
                q
            }
        }
    }
}

impl std::fmt::Display for QueryVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single search hit as surfaced by a provider, tagged with its
/// provenance. `link` is the identity key for deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
    /// e.g. "google", "bing", "duckduckgo"
    pub source_engine: String,
    pub variant: QueryVariant,
}

impl RawHit {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
        source_engine: impl Into<String>,
        variant: QueryVariant,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
            source_engine: source_engine.into(),
            variant,
        }
    }
}

/// Untagged hit exactly as a provider returns it; `run_search` attaches
/// the engine/variant provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch ordered results for an already-expanded query. Errors are
    /// absorbed by the caller as "zero results for this pair".
    async fn search(&self, query: &str) -> Result<Vec<ProviderHit>>;
    /// Engine name recorded on each hit (e.g. "google").
    fn engine(&self) -> &str;
}
