//! Tunable scoring tables with a built-in seed.
//!
//! JSON shape (any subset of fields; omitted fields keep seed values):
//! {
//!   "base_trust_max": 60.0,
//!   "recency_max": 15.0,
//!   "fact_check_max": 20.0,
//!   "type_adjust_max": 10.0,
//!   "default_base_trust": 50.0,
//!   "verdict_points": { "verified": 20.0, ... },
//!   "type_quality": { "government": 0.8, ... },
//!   "base_trust": { "government": 75.0, ... }
//! }

use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, io, path::Path};

use crate::analyze::source_type::SourceType;
use crate::analyze::verdict::Verdict;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Cap on the base-trust contribution.
    #[serde(default = "default_base_trust_max")]
    pub base_trust_max: f32,
    /// Cap on the recency contribution.
    #[serde(default = "default_recency_max")]
    pub recency_max: f32,
    /// Magnitude cap on the signed fact-check contribution.
    #[serde(default = "default_fact_check_max")]
    pub fact_check_max: f32,
    /// Magnitude cap on the signed type-quality adjustment.
    #[serde(default = "default_type_adjust_max")]
    pub type_adjust_max: f32,
    /// Base-trust prior when a source type has no entry.
    #[serde(default = "default_default_base_trust")]
    pub default_base_trust: f32,
    /// Signed points per verdict label; unmapped labels score 0.
    #[serde(default = "seed_verdict_points")]
    pub verdict_points: HashMap<String, f32>,
    /// Per-type multiplier applied to `type_adjust_max`.
    #[serde(default = "seed_type_quality")]
    pub type_quality: HashMap<String, f32>,
    /// Base-trust prior per source type, on a 0-100 scale.
    #[serde(default = "seed_base_trust")]
    pub base_trust: HashMap<String, f32>,
}

fn default_base_trust_max() -> f32 {
    60.0
}
fn default_recency_max() -> f32 {
    15.0
}
fn default_fact_check_max() -> f32 {
    20.0
}
fn default_type_adjust_max() -> f32 {
    10.0
}
fn default_default_base_trust() -> f32 {
    50.0
}

fn seed_verdict_points() -> HashMap<String, f32> {
    let mut m = HashMap::new();
    for (k, v) in [
        ("verified", 20.0),
        ("neutral", 0.0),
        ("disputed", -20.0),
        ("disputed_false", -20.0),
        ("pending", -2.0),
        ("lacks_consensus", -8.0),
        ("needs_context", 0.0),
        ("needs_context_literal", 0.0),
        ("needs_context_fallback", 0.0),
        ("service_unavailable", 0.0),
        ("unverifiable", -12.0),
        ("error_parsing", -5.0),
        ("error", -5.0),
    ] {
        m.insert(k.to_string(), v);
    }
    m
}

fn seed_type_quality() -> HashMap<String, f32> {
    let mut m = HashMap::new();
    for (k, v) in [
        (SourceType::Government, 0.8),
        (SourceType::AcademicInstitution, 0.9),
        (SourceType::ResearchPublication, 0.9),
        (SourceType::Encyclopedia, 0.7),
        (SourceType::NewsMediaMainstream, 0.6),
        (SourceType::NewsOpinionBlogLive, 0.3),
        (SourceType::NgoNonprofitPublication, 0.5),
        (SourceType::NgoNonprofitOrganization, 0.4),
        (SourceType::NgoNonprofitGeneral, 0.2),
        (SourceType::CorporateBlogPrInfo, 0.1),
        (SourceType::NewsMediaOtherOrBlog, -0.3),
        (SourceType::SocialMediaPlatform, -0.8),
        (SourceType::SocialMediaPlatformVideo, -0.7),
        (SourceType::SocialMediaChannelCreator, -0.5),
        (SourceType::SocialBloggingPlatformUserPub, -0.4),
        (SourceType::SocialBloggingPlatform, -0.6),
        (SourceType::WebsiteGeneral, 0.0),
        (SourceType::UnknownUrl, -0.9),
        (SourceType::UnknownOther, -0.9),
        (SourceType::UnknownErrorParsing, -1.0),
    ] {
        m.insert(k.as_str().to_string(), v);
    }
    m
}

fn seed_base_trust() -> HashMap<String, f32> {
    let mut m = HashMap::new();
    for (k, v) in [
        (SourceType::Government, 75.0),
        (SourceType::AcademicInstitution, 90.0),
        (SourceType::ResearchPublication, 90.0),
        (SourceType::Encyclopedia, 80.0),
        (SourceType::NewsMediaMainstream, 75.0),
        (SourceType::NewsOpinionBlogLive, 60.0),
        (SourceType::NgoNonprofitPublication, 65.0),
        (SourceType::NgoNonprofitOrganization, 60.0),
        (SourceType::NgoNonprofitGeneral, 55.0),
        (SourceType::CorporateBlogPrInfo, 60.0),
        (SourceType::NewsMediaOtherOrBlog, 40.0),
        (SourceType::SocialMediaPlatform, 20.0),
        (SourceType::SocialMediaPlatformVideo, 25.0),
        (SourceType::SocialMediaChannelCreator, 30.0),
        (SourceType::SocialBloggingPlatformUserPub, 40.0),
        (SourceType::SocialBloggingPlatform, 35.0),
        (SourceType::WebsiteGeneral, 50.0),
        (SourceType::UnknownUrl, 30.0),
        (SourceType::UnknownOther, 30.0),
        (SourceType::UnknownErrorParsing, 20.0),
    ] {
        m.insert(k.as_str().to_string(), v);
    }
    m
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_trust_max: default_base_trust_max(),
            recency_max: default_recency_max(),
            fact_check_max: default_fact_check_max(),
            type_adjust_max: default_type_adjust_max(),
            default_base_trust: default_default_base_trust(),
            verdict_points: seed_verdict_points(),
            type_quality: seed_type_quality(),
            base_trust: seed_base_trust(),
        }
    }
}

impl ScoringConfig {
    /// Signed fact-check points for a verdict label. Unmapped labels are 0.
    pub fn verdict_points(&self, verdict: &Verdict) -> f32 {
        self.verdict_points
            .get(verdict.as_str())
            .copied()
            .unwrap_or(0.0)
    }

    /// Type-quality multiplier, clamped to [-1.0, 1.0].
    pub fn type_quality(&self, source_type: SourceType) -> f32 {
        self.type_quality
            .get(source_type.as_str())
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }

    /// Base-trust prior for a source type, on a 0-100 scale.
    pub fn base_trust_for(&self, source_type: SourceType) -> f32 {
        self.base_trust
            .get(source_type.as_str())
            .copied()
            .unwrap_or(self.default_base_trust)
            .clamp(0.0, 100.0)
    }
}

/// Load a scoring config from JSON. Missing fields keep seed values.
pub fn load_scoring_file(path: &Path) -> io::Result<ScoringConfig> {
    let bytes = fs::read(path)?;
    let cfg: ScoringConfig = serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(cfg)
}
