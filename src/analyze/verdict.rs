//! Tiered parser for AI fact-check output.
//!
//! Providers are asked for `{"verdict": "...", "explanation": "..."}` but
//! return all sorts of shapes in practice: valid JSON, Python-literal-style
//! dicts with single quotes, fenced code blocks, or plain prose. The parse
//! runs strict JSON → permissive literal structure → keyword scan; the last
//! tier always succeeds, so callers never see an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized fact-check verdict label: lower-cased, spaces replaced by
/// underscores. Open-ended — labels the scoring table does not know are
/// kept verbatim (and score 0), never remapped to a different name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verdict(String);

impl Verdict {
    pub fn new(raw: &str) -> Self {
        Self(normalize_label(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Parsed fact-check outcome: verdict + human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckOutcome {
    pub verdict: Verdict,
    pub explanation: String,
}

impl FactCheckOutcome {
    /// Collaborator-level failure (the fact-check call itself broke); the
    /// raw payload is embedded for diagnosis.
    pub fn error_parsing(raw: &str) -> Self {
        Self {
            verdict: Verdict::new("error_parsing"),
            explanation: format!("Fact-check response could not be processed. Raw: {raw}"),
        }
    }
}

/// The shapes an AI payload can decode into, tried in order.
#[derive(Debug)]
enum Payload {
    Json(serde_json::Map<String, serde_json::Value>),
    LiteralLike(HashMap<String, String>),
    FreeText,
}

fn decode_payload(raw: &str) -> Payload {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(raw) {
        return Payload::Json(map);
    }
    if let Some(map) = parse_literal_dict(raw) {
        return Payload::LiteralLike(map);
    }
    Payload::FreeText
}

/// Parse a fact-check response. Total: the keyword tier guarantees a value.
pub fn parse_verdict(raw: &str) -> FactCheckOutcome {
    match decode_payload(raw) {
        Payload::Json(map) => {
            let verdict = map
                .get("verdict")
                .and_then(|v| v.as_str())
                .unwrap_or("needs_context");
            let explanation = map
                .get("explanation")
                .and_then(|v| v.as_str())
                .unwrap_or("AI provided no detail.")
                .to_string();
            FactCheckOutcome {
                verdict: Verdict::new(verdict),
                explanation,
            }
        }
        Payload::LiteralLike(map) => {
            let verdict = map
                .get("verdict")
                .map(String::as_str)
                .unwrap_or("needs_context_literal");
            let explanation = map
                .get("explanation")
                .cloned()
                .unwrap_or_else(|| format!("AI explanation (from dict-like response): {raw}"));
            FactCheckOutcome {
                verdict: Verdict::new(verdict),
                explanation,
            }
        }
        Payload::FreeText => {
            let lower = raw.to_lowercase();
            let verdict = if lower.contains("verified") {
                "verified"
            } else if lower.contains("disputed") || lower.contains("false") {
                "disputed_false"
            } else if lower.contains("lacks consensus") {
                "lacks_consensus"
            } else {
                "needs_context_fallback"
            };
            FactCheckOutcome {
                verdict: Verdict::new(verdict),
                explanation: format!("AI response format error. Raw: {raw}"),
            }
        }
    }
}

// ------------------------------------------------------------
// Permissive literal-structure parse (tier 2)
// ------------------------------------------------------------

/// Parse a flat Python-literal-style dict: `{'verdict': 'False',
/// 'explanation': "x", 'flag': True}`. Keys must be quoted strings; values
/// may be quoted strings or bare tokens (True/None/numbers/identifiers).
/// Returns `None` unless the whole input is one mapping.
fn parse_literal_dict(raw: &str) -> Option<HashMap<String, String>> {
    let s = raw.trim();
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;

    let mut map = HashMap::new();
    let mut rest = inner.trim();
    while !rest.is_empty() {
        let (key, after_key) = take_quoted(rest)?;
        let after_colon = after_key.trim_start().strip_prefix(':')?;
        let (value, after_value) = take_scalar(after_colon.trim_start())?;
        map.insert(key, value);

        rest = after_value.trim_start();
        match rest.strip_prefix(',') {
            Some(r) => rest = r.trim_start(),
            None => {
                if !rest.is_empty() {
                    return None;
                }
            }
        }
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Take a single- or double-quoted string off the front of `s`.
fn take_quoted(s: &str) -> Option<(String, &str)> {
    let mut chars = s.char_indices();
    let (_, quote) = chars.next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let mut out = String::new();
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Some((out, &s[i + c.len_utf8()..]));
        } else {
            out.push(c);
        }
    }
    None
}

/// Take a quoted string or a bare token (up to `,` or end).
fn take_scalar(s: &str) -> Option<(String, &str)> {
    if s.starts_with('\'') || s.starts_with('"') {
        return take_quoted(s);
    }
    // Bare token: nested lists/dicts are out; this tier only accepts flat
    // scalar values.
    if s.starts_with('{') || s.starts_with('[') {
        return None;
    }
    let end = s.find(',').unwrap_or(s.len());
    let token = s[..end].trim();
    if token.is_empty() {
        return None;
    }
    Some((token.to_string(), &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_json_tier() {
        let out = parse_verdict(r#"{"verdict":"Verified","explanation":"checks out"}"#);
        assert_eq!(out.verdict.as_str(), "verified");
        assert_eq!(out.explanation, "checks out");
    }

    #[test]
    fn json_label_is_normalized_not_remapped() {
        let out = parse_verdict(r#"{"verdict":"False","explanation":"x"}"#);
        assert_eq!(out.verdict.as_str(), "false");

        let out = parse_verdict(r#"{"verdict":"Lacks Consensus","explanation":"x"}"#);
        assert_eq!(out.verdict.as_str(), "lacks_consensus");
    }

    #[test]
    fn json_without_verdict_key_defaults() {
        let out = parse_verdict(r#"{"explanation":"only detail"}"#);
        assert_eq!(out.verdict.as_str(), "needs_context");
        assert_eq!(out.explanation, "only detail");
    }

    #[test]
    fn literal_tier_single_quotes() {
        let out = parse_verdict(r#"{'verdict': 'Disputed False', 'explanation': 'nope'}"#);
        assert_eq!(out.verdict.as_str(), "disputed_false");
        assert_eq!(out.explanation, "nope");
    }

    #[test]
    fn literal_tier_bare_tokens() {
        let out = parse_verdict(r#"{'verdict': Unverifiable, 'confidence': 0.4}"#);
        assert_eq!(out.verdict.as_str(), "unverifiable");
    }

    #[test]
    fn literal_tier_requires_a_mapping() {
        // A list literal must not be accepted by tier 2; the keyword tier
        // picks it up instead.
        let out = parse_verdict(r#"['verified', 'high confidence']"#);
        assert_eq!(out.verdict.as_str(), "verified");
        assert!(out.explanation.contains("['verified'"));
    }

    #[test]
    fn keyword_tier_scans_raw_text() {
        let out = parse_verdict("not json at all but contains the word verified");
        assert_eq!(out.verdict.as_str(), "verified");
        assert!(out
            .explanation
            .contains("not json at all but contains the word verified"));

        let out = parse_verdict("the claim is false according to reports");
        assert_eq!(out.verdict.as_str(), "disputed_false");

        let out = parse_verdict("this topic lacks consensus among experts");
        assert_eq!(out.verdict.as_str(), "lacks_consensus");
    }

    #[test]
    fn keyword_tier_default_marker() {
        let out = parse_verdict("nothing usable here");
        assert_eq!(out.verdict.as_str(), "needs_context_fallback");
        assert!(out.explanation.contains("nothing usable here"));
    }

    #[test]
    fn non_object_json_falls_through() {
        // Valid JSON, but not an object: tier 1 rejects, tier 3 scans.
        let out = parse_verdict(r#""verified""#);
        assert_eq!(out.verdict.as_str(), "verified");
    }

    #[test]
    fn error_parsing_embeds_raw() {
        let out = FactCheckOutcome::error_parsing("raw payload");
        assert_eq!(out.verdict.as_str(), "error_parsing");
        assert!(out.explanation.contains("raw payload"));
    }
}
