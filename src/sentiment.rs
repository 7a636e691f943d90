use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Sentiment judgment for a hit's text: score in [-1, 1] plus a coarse
/// label. Degraded paths carry sentinel labels instead of a plain
/// "neutral" so consumers can tell "balanced" from "nothing to analyze".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f32,
    pub label: String,
}

impl Sentiment {
    fn no_content() -> Self {
        Self {
            score: 0.0,
            label: "neutral_no_content".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }

    /// Raw lexicon sum plus token count.
    /// Negation: a negator within the preceding 1..=3 tokens inverts the
    /// sign of a word's lexicon score.
    pub fn score_text(&self, text: &str) -> (i32, usize) {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut score: i32 = 0;

        for i in 0..tokens.len() {
            let w = tokens[i].as_str();
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            let base = self.word_score(w);
            if base != 0 {
                score += if negated { -base } else { base };
            }
        }

        (score, tokens.len())
    }

    /// Normalized sentiment for a title+snippet blob. Empty or
    /// whitespace-only input yields the `neutral_no_content` sentinel.
    pub fn analyze(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::no_content();
        }

        let (raw, _tokens) = self.score_text(text);
        // Each lexicon point moves the needle a quarter of the scale.
        let score = (raw as f32 * 0.25).clamp(-1.0, 1.0);
        let label = if score >= 0.25 {
            "positive"
        } else if score <= -0.25 {
            "negative"
        } else {
            "neutral"
        };
        Sentiment {
            score,
            label: label.to_string(),
        }
    }
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "without"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_words() {
        let s = SentimentAnalyzer::new();
        let pos = s.analyze("Vaccine trial shows promising breakthrough results");
        assert_eq!(pos.label, "positive");
        assert!(pos.score > 0.0);

        let neg = s.analyze("Outbreak triggers crisis and collapse fears");
        assert_eq!(neg.label, "negative");
        assert!(neg.score < 0.0);
    }

    #[test]
    fn negation_flips_sign() {
        let s = SentimentAnalyzer::new();
        let (raw, _) = s.score_text("this was not a success");
        assert!(raw < 0, "negated positive should score negative, got {raw}");
    }

    #[test]
    fn empty_input_gets_sentinel_label() {
        let s = SentimentAnalyzer::new();
        assert_eq!(s.analyze("").label, "neutral_no_content");
        assert_eq!(s.analyze("   \t ").label, "neutral_no_content");
    }

    #[test]
    fn score_is_clamped_to_unit_interval() {
        let s = SentimentAnalyzer::new();
        let out = s.analyze("success success breakthrough breakthrough success gains growth");
        assert!(out.score <= 1.0);
        assert_eq!(out.label, "positive");
    }

    #[test]
    fn plain_text_is_neutral() {
        let s = SentimentAnalyzer::new();
        let out = s.analyze("The committee met on Tuesday to discuss scheduling");
        assert_eq!(out.label, "neutral");
        assert_eq!(out.score, 0.0);
    }
}
