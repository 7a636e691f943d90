//! AI adapter: provider abstraction behind an object-safe client trait.
//!
//! Both callers (perspective batch classification, fact-check verdicts)
//! send one prompt and get one raw string back; everything downstream of
//! the string is deterministic parsing. Errors never cross the pipeline
//! boundary — call sites absorb them into rule-based fallbacks.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;

/// Trait object used by the pipeline entry points and tests.
pub trait AiClient: Send + Sync {
    /// Submit a prompt and return the raw completion text.
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Convenient alias used by callers.
pub type DynAiClient = Arc<dyn AiClient>;

/// Factory: build a client from injected configuration.
///
/// * `enabled == false` or a blank key → [`DisabledClient`] (every batch
///   falls back to rules).
/// * `provider == "openai"` → real OpenAI chat-completions client.
/// * anything else → [`DisabledClient`].
pub fn build_client_from_config(config: &AiConfig) -> DynAiClient {
    if !config.enabled || config.api_key.trim().is_empty() {
        return Arc::new(DisabledClient);
    }
    match config.provider.as_str() {
        "openai" => Arc::new(OpenAiClient::new(
            &config.api_key,
            &config.model,
            config.timeout_secs,
        )),
        _ => Arc::new(DisabledClient),
    }
}

// ------------------------------------------------------------
// Concrete clients
// ------------------------------------------------------------

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("perspective-engine/0.1 (+github.com/lumlich/perspective-engine)")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

impl AiClient for OpenAiClient {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            #[derive(Serialize)]
            struct Msg<'a> {
                role: &'a str,
                content: &'a str,
            }
            #[derive(Serialize)]
            struct Req<'a> {
                model: &'a str,
                messages: Vec<Msg<'a>>,
                temperature: f32,
            }
            #[derive(Deserialize)]
            struct Resp {
                choices: Vec<Choice>,
            }
            #[derive(Deserialize)]
            struct Choice {
                message: ChoiceMsg,
            }
            #[derive(Deserialize)]
            struct ChoiceMsg {
                content: String,
            }

            let req = Req {
                model: &self.model,
                messages: vec![Msg {
                    role: "user",
                    content: prompt,
                }],
                temperature: 0.1,
            };

            let resp = self
                .http
                .post("https://api.openai.com/v1/chat/completions")
                .bearer_auth(&self.api_key)
                .json(&req)
                .send()
                .await
                .context("openai request")?;

            let status = resp.status();
            anyhow::ensure!(status.is_success(), "openai returned {status}");

            let body: Resp = resp.json().await.context("openai response body")?;
            let content = body
                .choices
                .first()
                .map(|c| c.message.content.trim().to_string())
                .unwrap_or_default();
            anyhow::ensure!(!content.is_empty(), "openai returned empty completion");
            Ok(content)
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Always errors; used when AI is disabled or unconfigured so every batch
/// deterministically takes the rule-based path.
pub struct DisabledClient;

impl AiClient for DisabledClient {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async { Err(anyhow!("ai client disabled")) })
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Fixed-response client for tests and local runs.
#[derive(Clone)]
pub struct MockClient {
    pub fixed: String,
}

impl MockClient {
    pub fn new(fixed: impl Into<String>) -> Self {
        Self {
            fixed: fixed.into(),
        }
    }
}

impl AiClient for MockClient {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        let out = self.fixed.clone();
        Box::pin(async move { Ok(out) })
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Always-failing client for exercising degraded paths in tests.
pub struct FailingClient;

impl AiClient for FailingClient {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async { Err(anyhow!("simulated provider outage")) })
    }
    fn provider_name(&self) -> &'static str {
        "failing"
    }
}
