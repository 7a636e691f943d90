// src/analyze/mod.rs
//! Classification pipeline entry: turns deduped raw hits into classified,
//! scoreable records.

pub mod ai_adapter;
pub mod perspective;
pub mod scoring;
pub mod source_type;
pub mod verdict;
pub mod weights;

use chrono::Datelike;
use serde::Serialize;

use crate::analyze::ai_adapter::DynAiClient;
use crate::analyze::perspective::{classify_perspective_batch, Perspective};
use crate::analyze::scoring::{score_credibility, CredibilityScore};
use crate::analyze::source_type::{classify_source, SourceType};
use crate::analyze::verdict::Verdict;
use crate::analyze::weights::ScoringConfig;
use crate::config::PipelineConfig;
use crate::ingest::types::{QueryVariant, RawHit};
use crate::sentiment::{Sentiment, SentimentAnalyzer};

// Re-export convenient types.
pub use crate::analyze::ai_adapter::{build_client_from_config, AiClient};
pub use crate::analyze::perspective::infer_perspective;
pub use crate::analyze::scoring::ScoreBreakdown;
pub use crate::analyze::verdict::{parse_verdict, FactCheckOutcome};

/// A hit with every derived classification signal attached. Immutable
/// once built; credibility is computed from it on demand, not stored.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
    pub source_engine: String,
    pub variant: QueryVariant,
    pub source_type: SourceType,
    pub perspective: Perspective,
    pub sentiment: Sentiment,
    /// Prior trust for the source type, 0-100.
    pub base_trust: f32,
    /// Freshness signal, 0-100.
    pub recency_boost: f32,
}

impl ClassifiedHit {
    /// Score this hit against a fact-check verdict (use
    /// `Verdict::new("pending")` when no fact-check has run yet).
    pub fn credibility(&self, verdict: &Verdict, cfg: &ScoringConfig) -> CredibilityScore {
        score_credibility(
            self.source_type,
            self.base_trust,
            self.recency_boost,
            verdict,
            cfg,
        )
    }
}

/// Freshness boost from year mentions in the snippet: hits mentioning the
/// current or previous year get a small fixed boost on the 0-100 scale.
pub fn recency_boost(snippet: &str, now_year: i32) -> f32 {
    static RE_YEAR: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re = RE_YEAR.get_or_init(|| regex::Regex::new(r"\b(20\d{2})\b").unwrap());

    let fresh = re
        .captures_iter(snippet)
        .filter_map(|c| c[1].parse::<i32>().ok())
        .any(|y| y >= now_year - 1 && y <= now_year + 1);
    if fresh {
        5.0
    } else {
        0.0
    }
}

/// Classify a deduped batch: source type, perspective (AI with rule
/// fallback), sentiment, trust prior and recency signal per hit. Output is
/// index-aligned with the input.
pub async fn classify_batch(
    hits: Vec<RawHit>,
    ai: Option<&DynAiClient>,
    cfg: &PipelineConfig,
) -> Vec<ClassifiedHit> {
    if hits.is_empty() {
        return Vec::new();
    }

    let perspectives = classify_perspective_batch(&hits, ai, &cfg.ai).await;
    debug_assert_eq!(perspectives.len(), hits.len());

    let analyzer = SentimentAnalyzer::new();
    let now_year = chrono::Utc::now().year();

    hits.into_iter()
        .zip(perspectives)
        .map(|(hit, perspective)| {
            let source_type = classify_source(&hit.link);
            let sentiment = analyzer.analyze(&format!("{} {}", hit.title, hit.snippet));
            let base_trust = cfg.scoring.base_trust_for(source_type);
            let recency = recency_boost(&hit.snippet, now_year);
            ClassifiedHit {
                title: hit.title,
                snippet: hit.snippet,
                link: hit.link,
                source_engine: hit.source_engine,
                variant: hit.variant,
                source_type,
                perspective,
                sentiment,
                base_trust,
                recency_boost: recency,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_matches_current_and_previous_year() {
        assert_eq!(recency_boost("updated in 2026", 2026), 5.0);
        assert_eq!(recency_boost("figures from 2025", 2026), 5.0);
        assert_eq!(recency_boost("archive piece from 2019", 2026), 0.0);
        assert_eq!(recency_boost("no years here", 2026), 0.0);
    }

    #[test]
    fn recency_ignores_non_year_numbers() {
        assert_eq!(recency_boost("serial 202634 is not a year", 2026), 0.0);
    }

    #[tokio::test]
    async fn classify_batch_without_ai_uses_rules_end_to_end() {
        let cfg = PipelineConfig::default();
        let this_year = chrono::Utc::now().year();
        let hits = vec![
            RawHit::new(
                "Flu guidance",
                format!("Updated guidance for {this_year}"),
                "https://www.cdc.gov/flu",
                "google",
                QueryVariant::Broad,
            ),
            RawHit::new(
                "The hidden truth about flu shots",
                "what they don't want you to know",
                "https://truth-channel.net/flu",
                "bing",
                QueryVariant::Fringe,
            ),
        ];

        let out = classify_batch(hits, None, &cfg).await;
        assert_eq!(out.len(), 2);

        assert_eq!(out[0].source_type, SourceType::Government);
        assert_eq!(out[0].perspective, Perspective::Mainstream);
        assert_eq!(out[0].recency_boost, 5.0);
        assert_eq!(out[0].base_trust, 75.0);

        assert_eq!(out[1].perspective, Perspective::Alternative);

        let scored = out[0].credibility(&Verdict::new("verified"), &cfg.scoring);
        assert!(scored.score > out[1]
            .credibility(&Verdict::new("verified"), &cfg.scoring)
            .score);
    }
}
