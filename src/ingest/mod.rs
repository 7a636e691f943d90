// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use crate::ingest::types::{QueryVariant, RawHit, SearchProvider};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

/// One-time metrics registration (so series show up on the host's exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("search_hits_total", "Total hits fetched from providers.");
        describe_counter!(
            "search_kept_total",
            "Hits kept after normalization + deduplication."
        );
        describe_counter!(
            "search_dedup_total",
            "Hits removed or replaced by link-level deduplication."
        );
        describe_counter!(
            "search_provider_errors_total",
            "Provider fetch/parse errors (each yields zero hits for its pair)."
        );
    });
}

/// Normalize provider text: entity decode, strip tags, collapse whitespace,
/// trim stray punctuation.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags (SERP snippets carry <b> highlights and worse)
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // 5) Strip trailing sentence punctuation (keep quotes)
    while let Some(last) = out.chars().last() {
        if matches!(last, '!' | '?' | ',') {
            out.pop();
        } else {
            break;
        }
    }

    // 6) Length cap: 1500 chars
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

/// Merge hits from all (engine, variant) pairs into a unique-by-link list.
///
/// First occurrence wins, with one exception: a broad-variant hit replaces
/// an earlier fringe-variant hit for the same link, in place. Broad
/// provenance is the canonical record when both variants surface a link.
/// No ordering guarantee beyond that.
pub fn dedupe_by_link(hits: Vec<RawHit>) -> Vec<RawHit> {
    let mut index_by_link: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<RawHit> = Vec::with_capacity(hits.len());

    for hit in hits {
        match index_by_link.get(&hit.link) {
            None => {
                index_by_link.insert(hit.link.clone(), out.len());
                out.push(hit);
            }
            Some(&i) => {
                if out[i].variant == QueryVariant::Fringe && hit.variant == QueryVariant::Broad {
                    out[i] = hit;
                }
                counter!("search_dedup_total").increment(1);
            }
        }
    }

    out
}

/// Fan the query out across engines x variants, normalize, and dedupe.
///
/// A provider error for one (engine, variant) pair is logged and counted
/// and contributes zero hits; the remaining pairs are unaffected.
pub async fn run_search(
    providers: &[Box<dyn SearchProvider>],
    query: &str,
    include_fringe: bool,
) -> Vec<RawHit> {
    ensure_metrics_described();

    let variants: &[QueryVariant] = if include_fringe {
        &[QueryVariant::Broad, QueryVariant::Fringe]
    } else {
        &[QueryVariant::Broad]
    };

    let mut raw: Vec<RawHit> = Vec::new();
    for &variant in variants {
        let expanded = variant.expand(query);
        for p in providers {
            match p.search(&expanded).await {
                Ok(hits) => {
                    counter!("search_hits_total").increment(hits.len() as u64);
                    for h in hits {
                        if h.link.trim().is_empty() {
                            continue;
                        }
                        raw.push(RawHit {
                            title: normalize_text(&h.title),
                            snippet: normalize_text(&h.snippet),
                            link: h.link,
                            source_engine: p.engine().to_string(),
                            variant,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(error = ?e, engine = p.engine(), %variant, "provider error");
                    counter!("search_provider_errors_total").increment(1);
                }
            }
        }
    }

    let kept = dedupe_by_link(raw);
    counter!("search_kept_total").increment(kept.len() as u64);
    kept
}
