//! Gemini `generateContent` oracle.
//!
//! Sends the rendered prompt as a single user part and returns the first
//! candidate's text. If the reply has no text at the expected path the raw
//! JSON is returned instead, so the caller always has something to show.

use async_trait::async_trait;
use faqdesk_core::config::FallbackConfig;
use faqdesk_core::error::{FaqError, Result};
use faqdesk_core::traits::Oracle;
use serde_json::{Value, json};

pub struct GeminiOracle {
    /// API key, passed as the `key` query parameter.
    api_key: String,
    /// Base URL (e.g. "https://generativelanguage.googleapis.com/v1beta").
    base_url: String,
    /// Model name (e.g. "gemini-2.0-flash").
    model: String,
    client: reqwest::Client,
}

impl GeminiOracle {
    /// Create from the fallback config.
    ///
    /// API key resolution: `config.api_key` > `GEMINI_API_KEY` env > empty.
    pub fn from_config(config: &FallbackConfig) -> Result<Self> {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("GEMINI_API_KEY").unwrap_or_default()
        };

        let client = reqwest::Client::builder()
            .user_agent(concat!("faqdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FaqError::Oracle(format!("Client error: {e}")))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Text at `candidates[0].content.parts[0].text`, or the whole body.
fn extract_text(body: &Value) -> String {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl Oracle for GeminiOracle {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(FaqError::Oracle("GEMINI_API_KEY is not set".into()));
        }

        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        tracing::debug!("🔮 Gemini request: model={}, prompt_len={}", self.model, prompt.len());
        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| FaqError::Oracle(format!("Request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| FaqError::Oracle(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::warn!("⚠️ Gemini API error {status}");
            return Err(FaqError::Oracle(text));
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(json) => Ok(extract_text(&json)),
            Err(_) => Ok(text),
        }
    }
}
