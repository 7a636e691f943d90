// src/debug.rs
//! Dev-only logging helpers: anonymized identifiers and a tracing init
//! gated so production binaries embedding this crate stay quiet unless
//! explicitly asked.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Dev logging gate: PIPELINE_DEV_LOG=1 AND a debug build.
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var("PIPELINE_DEV_LOG").ok().as_deref() == Some("1");
    on && cfg!(debug_assertions)
}

/// Short anonymized hash for URLs/links in logs. Never log raw links at
/// info level; six bytes of SHA-256 is plenty for correlating log lines.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Enable compact tracing logs in development only. No-op unless the
/// dev gate is open; safe to call more than once (the second init fails
/// quietly).
pub fn enable_dev_tracing() {
    if !dev_logging_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("perspective_engine=debug,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_hash_is_stable_and_short() {
        let a = anon_hash("https://example.com/article");
        let b = anon_hash("https://example.com/article");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_ne!(a, anon_hash("https://example.com/other"));
    }
}
