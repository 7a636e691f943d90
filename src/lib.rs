// src/lib.rs
// Public library surface for integration tests (and host-app reuse).

pub mod config;
pub mod debug;
pub mod ingest;
pub mod sentiment;

// Classification pipeline (source type, perspective, verdict, scoring)
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::ai_adapter::{
    build_client_from_config, AiClient, DisabledClient, DynAiClient, FailingClient, MockClient,
};
pub use crate::analyze::perspective::{classify_perspective_batch, infer_perspective, Perspective};
pub use crate::analyze::scoring::{score_credibility, CredibilityScore, ScoreBreakdown};
pub use crate::analyze::source_type::{classify_source, SourceType};
pub use crate::analyze::verdict::{parse_verdict, FactCheckOutcome, Verdict};
pub use crate::analyze::weights::{load_scoring_file, ScoringConfig};
pub use crate::analyze::{classify_batch, recency_boost, ClassifiedHit};
pub use crate::config::{AiConfig, PipelineConfig, SearchConfig};
pub use crate::ingest::providers::{build_providers_from_config, SerpApiProvider};
pub use crate::ingest::types::{ProviderHit, QueryVariant, RawHit, SearchProvider};
pub use crate::ingest::{dedupe_by_link, normalize_text, run_search};
pub use crate::sentiment::{Sentiment, SentimentAnalyzer};
