//! Credibility scoring with an auditable breakdown.
//!
//! Four independently clamped contributions sum to the final 0-100 score:
//! base trust (scaled prior), recency, signed fact-check points, and the
//! per-type quality adjustment. The rounded contributions are returned
//! alongside the final integer; their sum reconstructs it within ±1 (the
//! slack comes from rounding each part to 2 decimals).

use serde::Serialize;

use crate::analyze::source_type::SourceType;
use crate::analyze::verdict::Verdict;
use crate::analyze::weights::ScoringConfig;

/// Per-factor contributions, each rounded to 2 decimals after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base_trust_contribution: f32,
    pub recency_contribution: f32,
    pub fact_check_contribution: f32,
    pub type_quality_adjustment: f32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f32 {
        self.base_trust_contribution
            + self.recency_contribution
            + self.fact_check_contribution
            + self.type_quality_adjustment
    }
}

/// Final score plus the contributions that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CredibilityScore {
    /// Integer in [0, 100].
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

/// Combine source type, base trust, recency and verdict into a clamped
/// 0-100 credibility score. Pure; all tables come from `cfg`.
pub fn score_credibility(
    source_type: SourceType,
    base_trust: f32,
    recency_boost: f32,
    verdict: &Verdict,
    cfg: &ScoringConfig,
) -> CredibilityScore {
    let bts = (base_trust / 100.0 * cfg.base_trust_max).clamp(0.0, cfg.base_trust_max);
    let rs = (recency_boost / 100.0 * cfg.recency_max).clamp(0.0, cfg.recency_max);
    let fcs = cfg
        .verdict_points(verdict)
        .clamp(-cfg.fact_check_max, cfg.fact_check_max);
    let ita = (cfg.type_quality(source_type) * cfg.type_adjust_max)
        .clamp(-cfg.type_adjust_max, cfg.type_adjust_max);

    let total = bts + rs + fcs + ita;
    let score = total.clamp(0.0, 100.0).round() as u8;

    CredibilityScore {
        score,
        breakdown: ScoreBreakdown {
            base_trust_contribution: round2(bts),
            recency_contribution: round2(rs),
            fact_check_contribution: round2(fcs),
            type_quality_adjustment: round2(ita),
        },
    }
}
