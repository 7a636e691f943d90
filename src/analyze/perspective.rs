//! Two-tier perspective classification.
//!
//! The primary path asks an AI collaborator to label a bounded batch of
//! hits; the fallback is a deterministic rule chain over URL and title.
//! When the collaborator errors or times out, the WHOLE batch takes the
//! fallback — AI-derived and rule-derived labels are never mixed for a
//! failed call. A successful-but-partial response is different: hits the
//! response skipped (including everything beyond the batch cap) fall back
//! individually.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::analyze::ai_adapter::DynAiClient;
use crate::analyze::source_type::{
    ALTERNATIVE_KEYWORDS, KNOWN_ACADEMIC_PUBLISHERS, KNOWN_MAINSTREAM_NEWS_DOMAINS,
};
use crate::config::AiConfig;
use crate::debug::anon_hash;
use crate::ingest::types::RawHit;

/// Coarse editorial-stance label. Closed three-way taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Mainstream,
    Alternative,
    Neutral,
}

impl Perspective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Perspective::Mainstream => "mainstream",
            Perspective::Alternative => "alternative",
            Perspective::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Perspective {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainstream" => Ok(Perspective::Mainstream),
            "alternative" => Ok(Perspective::Alternative),
            "neutral" => Ok(Perspective::Neutral),
            _ => Err(()),
        }
    }
}

// ------------------------------------------------------------
// Rule-based fallback
// ------------------------------------------------------------

/// Authority domains checked before anything else (substring match on the
/// full URL, so path-level .gov.uk style hosts match too).
const GOV_EDU_HEALTH_DOMAINS: &[&str] =
    &[".gov", ".edu", "who.int", "cdc.gov", "nih.gov", ".un.org"];

const REFERENCE_SITES: &[&str] = &[
    "wikipedia.org",
    "britannica.com",
    "snopes.com",
    "factcheck.org",
];

const ACADEMIC_JOURNAL_DOMAINS: &[&str] = &[
    "nature.com",
    "science.org",
    "nejm.org",
    "bmj.com",
    "thelancet.com",
    "cell.com",
    "pubmed",
    "sciencedirect",
    "springer",
    "wiley",
    "oxfordjournals.org",
    "jamanetwork.com",
    "arxiv.org",
    "plos.org",
    "frontiersin.org",
];

/// Title phrases that flip an academic-journal hit out of mainstream.
const DISPUTE_SIGNALS: &[&str] = &["controversial", "disputed", "alternative view"];

const ALTERNATIVE_TITLE_PHRASES: &[&str] = &[
    "what they aren't telling you",
    "the truth about",
    "what doctors won't say",
    "doctors are silent",
    "big-pharma agenda",
    "media won't show you",
    "the untold story of",
    "hidden agenda",
    "the great awakening",
    "red pill",
];

fn official_title_re() -> &'static regex::Regex {
    static RE: OnceCell<regex::Regex> = OnceCell::new();
    RE.get_or_init(|| {
        regex::Regex::new(
            r"(?i)official|report|study|research|analysis|guidelines|statement from|university study|government report",
        )
        .unwrap()
    })
}

/// Deterministic perspective classification from URL and title alone.
/// Ordered chain, first match wins; shares its domain and keyword tables
/// with the source-type classifier.
pub fn infer_perspective(url: &str, title: &str) -> Perspective {
    let url = url.to_lowercase();
    let title = title.to_lowercase();

    if GOV_EDU_HEALTH_DOMAINS.iter().any(|d| url.contains(d)) {
        return Perspective::Mainstream;
    }

    if KNOWN_MAINSTREAM_NEWS_DOMAINS.iter().any(|d| url.contains(d)) {
        return Perspective::Mainstream;
    }

    if REFERENCE_SITES.iter().any(|d| url.contains(d)) {
        return Perspective::Neutral;
    }

    if ALTERNATIVE_KEYWORDS
        .iter()
        .any(|k| url.contains(k) || title.contains(k))
    {
        return Perspective::Alternative;
    }

    if ACADEMIC_JOURNAL_DOMAINS.iter().any(|d| url.contains(d))
        && !DISPUTE_SIGNALS.iter().any(|s| title.contains(s))
    {
        return Perspective::Mainstream;
    }

    if ALTERNATIVE_TITLE_PHRASES.iter().any(|p| title.contains(p)) {
        return Perspective::Alternative;
    }

    if official_title_re().is_match(&title)
        && !ALTERNATIVE_KEYWORDS.iter().any(|k| title.contains(k))
        && !ALTERNATIVE_TITLE_PHRASES.iter().any(|p| title.contains(p))
    {
        return Perspective::Mainstream;
    }

    Perspective::Neutral
}

// ------------------------------------------------------------
// AI batch path
// ------------------------------------------------------------

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "perspective_ai_fallback_total",
            "Batches routed entirely to rule-based perspective classification."
        );
        describe_counter!(
            "perspective_ai_partial_total",
            "Hits missing from an otherwise usable AI response."
        );
    });
}

fn build_batch_prompt(hits: &[RawHit]) -> String {
    let mut items = String::new();
    for (i, h) in hits.iter().enumerate() {
        items.push_str(&format!(
            "{{\"index\": {i}, \"title\": {t}, \"link\": {l}, \"snippet\": {s}}}\n",
            t = serde_json::to_string(&h.title).unwrap_or_default(),
            l = serde_json::to_string(&h.link).unwrap_or_default(),
            s = serde_json::to_string(&h.snippet).unwrap_or_default(),
        ));
    }

    format!(
        "You are a media bias analyst specializing in identifying the perspective of \
         information sources.\n\
         Classify each search result into ONE of these perspective categories:\n\
         1. \"mainstream\": major news networks, government websites, established health \
         organizations, university websites and reputable academic publications, content \
         presenting widely accepted scientific consensus or official positions.\n\
         2. \"alternative\": sources presenting contrarian views to established consensus, \
         sites promoting unconventional theories, sources that consistently challenge \
         mainstream media, governments, or scientific bodies.\n\
         3. \"neutral\": purely factual educational content, reference materials such as \
         encyclopedias or databases, technical documentation, primary research presented \
         without significant political framing.\n\
         For EACH search result, analyze the URL, title, and snippet.\n\
         Return ONLY a valid JSON array of objects with \"link\" and \"perspective\" \
         fields, one per result.\n\n\
         Results to classify:\n{items}"
    )
}

/// Extract link → perspective pairs from an AI response. Accepts either a
/// bare array or an object with a `results` array; elements with an
/// unknown label or no link are skipped.
fn parse_batch_response(raw: &str) -> HashMap<String, Perspective> {
    let mut out = HashMap::new();

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => return out,
    };
    let items = match &value {
        serde_json::Value::Array(a) => a.as_slice(),
        serde_json::Value::Object(o) => match o.get("results").and_then(|r| r.as_array()) {
            Some(a) => a.as_slice(),
            None => return out,
        },
        _ => return out,
    };

    for item in items {
        let link = item
            .get("link")
            .or_else(|| item.get("url"))
            .and_then(|v| v.as_str());
        let label = item.get("perspective").and_then(|v| v.as_str());
        if let (Some(link), Some(label)) = (link, label) {
            if let Ok(p) = Perspective::from_str(label) {
                out.insert(link.to_string(), p);
            }
        }
    }
    out
}

/// Classify a batch of hits, index-aligned with the input.
///
/// The AI collaborator sees at most `cfg.batch_max` hits and gets
/// `cfg.timeout_secs` to answer. Timeout or error → the whole batch is
/// rule-classified. A usable response fills in what it covered; the rest
/// fall back per hit.
pub async fn classify_perspective_batch(
    hits: &[RawHit],
    ai: Option<&DynAiClient>,
    cfg: &AiConfig,
) -> Vec<Perspective> {
    ensure_metrics_described();

    if hits.is_empty() {
        return Vec::new();
    }

    let fallback_all =
        |hits: &[RawHit]| -> Vec<Perspective> {
            hits.iter()
                .map(|h| infer_perspective(&h.link, &h.title))
                .collect()
        };

    let Some(client) = ai else {
        return fallback_all(hits);
    };

    let batch_len = hits.len().min(cfg.batch_max.max(1));
    let prompt = build_batch_prompt(&hits[..batch_len]);

    let response = tokio::time::timeout(
        Duration::from_secs(cfg.timeout_secs.max(1)),
        client.complete(&prompt),
    )
    .await;

    let text = match response {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::warn!(error = ?e, provider = client.provider_name(), "ai classification error");
            counter!("perspective_ai_fallback_total").increment(1);
            return fallback_all(hits);
        }
        Err(_) => {
            tracing::warn!(provider = client.provider_name(), "ai classification timeout");
            counter!("perspective_ai_fallback_total").increment(1);
            return fallback_all(hits);
        }
    };

    let by_link = parse_batch_response(&text);
    if by_link.is_empty() {
        tracing::warn!(
            provider = client.provider_name(),
            "ai classification response unusable"
        );
        counter!("perspective_ai_fallback_total").increment(1);
        return fallback_all(hits);
    }

    let mut missing = 0u64;
    let out = hits
        .iter()
        .map(|h| {
            by_link.get(&h.link).copied().unwrap_or_else(|| {
                missing += 1;
                tracing::debug!(link = %anon_hash(&h.link), "hit missing from ai response");
                infer_perspective(&h.link, &h.title)
            })
        })
        .collect();
    if missing > 0 {
        counter!("perspective_ai_partial_total").increment(missing);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_domains_are_mainstream() {
        assert_eq!(
            infer_perspective("https://www.cdc.gov/flu", "Flu basics"),
            Perspective::Mainstream
        );
        assert_eq!(
            infer_perspective("https://news.mit.edu/x", "Campus news"),
            Perspective::Mainstream
        );
    }

    #[test]
    fn reference_sites_are_neutral() {
        assert_eq!(
            infer_perspective("https://en.wikipedia.org/wiki/X", "X"),
            Perspective::Neutral
        );
        assert_eq!(
            infer_perspective("https://www.snopes.com/fact-check/x", "X"),
            Perspective::Neutral
        );
    }

    #[test]
    fn alternative_keywords_in_url_or_title() {
        assert_eq!(
            infer_perspective("https://truthwire.net/latest", "daily digest"),
            Perspective::Alternative
        );
        assert_eq!(
            infer_perspective("https://somesite.com/a", "The deep state cover story"),
            Perspective::Alternative
        );
    }

    #[test]
    fn academic_journals_mainstream_unless_disputed() {
        assert_eq!(
            infer_perspective("https://www.nature.com/articles/x", "Genome study results"),
            Perspective::Mainstream
        );
        assert_eq!(
            infer_perspective(
                "https://www.nature.com/articles/x",
                "A controversial reanalysis"
            ),
            Perspective::Neutral
        );
    }

    #[test]
    fn alternative_title_phrases() {
        assert_eq!(
            infer_perspective("https://blog.example.io/post", "The truth about seed oils"),
            Perspective::Alternative
        );
    }

    #[test]
    fn official_looking_titles_are_mainstream() {
        assert_eq!(
            infer_perspective(
                "https://example.io/page",
                "Annual report on energy consumption"
            ),
            Perspective::Mainstream
        );
        // Unless an alternative signal co-occurs.
        assert_eq!(
            infer_perspective(
                "https://example.io/page",
                "Suppressed science report they banned"
            ),
            Perspective::Alternative
        );
    }

    #[test]
    fn default_is_neutral() {
        assert_eq!(
            infer_perspective("https://example.io/page", "Tuesday musings"),
            Perspective::Neutral
        );
    }

    #[test]
    fn batch_response_accepts_both_shapes() {
        let arr = r#"[{"link":"https://a.com","perspective":"mainstream"}]"#;
        let map = parse_batch_response(arr);
        assert_eq!(map.get("https://a.com"), Some(&Perspective::Mainstream));

        let obj = r#"{"results":[{"url":"https://b.com","perspective":"neutral"}]}"#;
        let map = parse_batch_response(obj);
        assert_eq!(map.get("https://b.com"), Some(&Perspective::Neutral));
    }

    #[test]
    fn batch_response_skips_out_of_taxonomy_labels() {
        let arr = r#"[
            {"link":"https://a.com","perspective":"centrist"},
            {"link":"https://b.com","perspective":"ALTERNATIVE"}
        ]"#;
        let map = parse_batch_response(arr);
        assert!(!map.contains_key("https://a.com"));
        assert_eq!(map.get("https://b.com"), Some(&Perspective::Alternative));
    }

    #[test]
    fn batch_response_garbage_is_empty() {
        assert!(parse_batch_response("no json here").is_empty());
        assert!(parse_batch_response("{\"unrelated\": 1}").is_empty());
    }
}
