// tests/verdict_parser.rs
use perspective_engine::{parse_verdict, FactCheckOutcome};

#[test]
fn strict_json_passes_through_normalized() {
    let out = parse_verdict(r#"{"verdict":"False","explanation":"x"}"#);
    // Normalized only — not remapped to a different label name.
    assert_eq!(out.verdict.as_str(), "false");
    assert_eq!(out.explanation, "x");
}

#[test]
fn python_literal_dict_is_tier_two() {
    let out = parse_verdict(
        r#"{'verdict': 'Lacks Consensus', 'explanation': 'experts disagree on this'}"#,
    );
    assert_eq!(out.verdict.as_str(), "lacks_consensus");
    assert_eq!(out.explanation, "experts disagree on this");
}

#[test]
fn literal_dict_with_missing_verdict_uses_literal_sentinel() {
    let out = parse_verdict(r#"{'explanation': 'only detail'}"#);
    assert_eq!(out.verdict.as_str(), "needs_context_literal");
}

#[test]
fn keyword_scan_is_the_last_resort() {
    let raw = "not json at all but contains the word verified";
    let out = parse_verdict(raw);
    assert_eq!(out.verdict.as_str(), "verified");
    assert!(out.explanation.contains(raw));
}

#[test]
fn keyword_scan_priorities() {
    // "verified" beats "disputed" when both appear.
    let out = parse_verdict("sources say verified, others say disputed");
    assert_eq!(out.verdict.as_str(), "verified");

    let out = parse_verdict("widely considered false by reviewers");
    assert_eq!(out.verdict.as_str(), "disputed_false");
}

#[test]
fn hopeless_input_never_errors() {
    for raw in ["", "   ", "{", "}{", "<html>oops</html>", "null", "42"] {
        let out = parse_verdict(raw);
        assert!(!out.verdict.as_str().is_empty(), "empty verdict for {raw:?}");
    }
    assert_eq!(parse_verdict("").verdict.as_str(), "needs_context_fallback");
}

#[test]
fn fenced_json_is_not_tier_one_but_still_resolves() {
    // Code fences break strict JSON; the keyword tier still lands it.
    let raw = "```json\n{\"verdict\": \"Verified\"}\n```";
    let out = parse_verdict(raw);
    assert_eq!(out.verdict.as_str(), "verified");
}

#[test]
fn collaborator_failure_constructor() {
    let out = FactCheckOutcome::error_parsing("timeout talking to provider");
    assert_eq!(out.verdict.as_str(), "error_parsing");
    assert!(out.explanation.contains("timeout talking to provider"));
}
