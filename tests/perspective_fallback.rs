// tests/perspective_fallback.rs
//! Degraded-path behavior of the batch perspective classifier: a failing
//! or useless AI collaborator must never poison the batch.

use std::sync::Arc;

use perspective_engine::{
    classify_perspective_batch, infer_perspective, AiConfig, DynAiClient, FailingClient,
    MockClient, Perspective, QueryVariant, RawHit,
};

fn sample_hits() -> Vec<RawHit> {
    vec![
        RawHit::new(
            "Flu vaccine guidance",
            "Official guidance",
            "https://www.cdc.gov/flu",
            "google",
            QueryVariant::Broad,
        ),
        RawHit::new(
            "The hidden truth about flu shots",
            "what they don't want you to know",
            "https://freedom-files.net/flu",
            "bing",
            QueryVariant::Fringe,
        ),
        RawHit::new(
            "Influenza - Wikipedia",
            "Influenza is an infectious disease",
            "https://en.wikipedia.org/wiki/Influenza",
            "google",
            QueryVariant::Broad,
        ),
    ]
}

fn cfg() -> AiConfig {
    AiConfig {
        enabled: true,
        timeout_secs: 2,
        batch_max: 15,
        ..AiConfig::default()
    }
}

#[tokio::test]
async fn erroring_client_routes_whole_batch_to_rules() {
    let hits = sample_hits();
    let client: DynAiClient = Arc::new(FailingClient);

    let out = classify_perspective_batch(&hits, Some(&client), &cfg()).await;

    let expected: Vec<Perspective> = hits
        .iter()
        .map(|h| infer_perspective(&h.link, &h.title))
        .collect();
    assert_eq!(out, expected);
    assert_eq!(out[0], Perspective::Mainstream);
    assert_eq!(out[1], Perspective::Alternative);
    assert_eq!(out[2], Perspective::Neutral);
}

#[tokio::test]
async fn missing_client_uses_rules() {
    let hits = sample_hits();
    let out = classify_perspective_batch(&hits, None, &cfg()).await;
    assert_eq!(out.len(), hits.len());
    assert_eq!(out[2], Perspective::Neutral);
}

#[tokio::test]
async fn garbage_response_routes_whole_batch_to_rules() {
    let hits = sample_hits();
    let client: DynAiClient = Arc::new(MockClient::new("I cannot classify these, sorry."));

    let out = classify_perspective_batch(&hits, Some(&client), &cfg()).await;
    let expected: Vec<Perspective> = hits
        .iter()
        .map(|h| infer_perspective(&h.link, &h.title))
        .collect();
    assert_eq!(out, expected);
}

#[tokio::test]
async fn partial_response_fills_gaps_per_hit() {
    let hits = sample_hits();
    // AI answers for the first link only, and disagrees with the rules on
    // purpose so the source of each label is visible.
    let client: DynAiClient = Arc::new(MockClient::new(
        r#"[{"link": "https://www.cdc.gov/flu", "perspective": "neutral"}]"#,
    ));

    let out = classify_perspective_batch(&hits, Some(&client), &cfg()).await;
    assert_eq!(out[0], Perspective::Neutral); // AI-provided
    assert_eq!(out[1], Perspective::Alternative); // rule fallback
    assert_eq!(out[2], Perspective::Neutral); // rule fallback
}

#[tokio::test]
async fn out_of_taxonomy_labels_fall_back() {
    let hits = sample_hits();
    let client: DynAiClient = Arc::new(MockClient::new(
        r#"[
            {"link": "https://www.cdc.gov/flu", "perspective": "establishment"},
            {"link": "https://freedom-files.net/flu", "perspective": "alternative"}
        ]"#,
    ));

    let out = classify_perspective_batch(&hits, Some(&client), &cfg()).await;
    // Unknown label ignored; rules take over for that hit.
    assert_eq!(out[0], Perspective::Mainstream);
    assert_eq!(out[1], Perspective::Alternative);
}

#[tokio::test]
async fn hits_beyond_batch_cap_are_rule_classified() {
    let mut hits = sample_hits();
    hits.push(RawHit::new(
        "Extra hit past the cap",
        "snippet",
        "https://example.org/extra",
        "google",
        QueryVariant::Broad,
    ));

    let mut small = cfg();
    small.batch_max = 2;

    // The mock labels every link it was shown; the capped-out hits cannot
    // appear in the response, so they must come from the rules.
    let client: DynAiClient = Arc::new(MockClient::new(
        r#"[
            {"link": "https://www.cdc.gov/flu", "perspective": "mainstream"},
            {"link": "https://freedom-files.net/flu", "perspective": "neutral"}
        ]"#,
    ));

    let out = classify_perspective_batch(&hits, Some(&client), &small).await;
    assert_eq!(out.len(), 4);
    assert_eq!(out[1], Perspective::Neutral); // from AI, overriding rules
    assert_eq!(out[3], infer_perspective("https://example.org/extra", "Extra hit past the cap"));
}

#[tokio::test]
async fn empty_batch_is_empty() {
    let client: DynAiClient = Arc::new(FailingClient);
    let out = classify_perspective_batch(&[], Some(&client), &cfg()).await;
    assert!(out.is_empty());
}
