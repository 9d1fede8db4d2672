//! Gemini generateContent client.
//!
//! Synchronous request/response only: no streaming, no tool calling, and
//! no retries. A failed call surfaces immediately as an error result for
//! that one request.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::GenerativeModel;
use crate::config::RelayConfig;

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

impl GeminiClient {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }
}

/// Concatenate the text parts of the first candidate. Falls back to the
/// raw JSON rendered as a string when no text part is present, so the
/// caller always gets something persistable back from a 2xx response.
fn extract_text(parsed: GeminiResponse, raw: &Value) -> String {
    let mut text = String::new();
    if let Some(candidates) = parsed.candidates {
        if let Some(candidate) = candidates.into_iter().next() {
            for part in candidate.content.parts {
                if let Some(t) = part.text {
                    text.push_str(&t);
                }
            }
        }
    }

    if text.is_empty() {
        raw.to_string()
    } else {
        text
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let api_request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiTextPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("Sending generateContent request: model={}", model);

        let response = self
            .client
            .post(self.endpoint(model))
            .json(&api_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error: {} - {}", status, body);
        }

        let raw: Value = response.json().await?;
        let parsed: GeminiResponse = match serde_json::from_value(raw.clone()) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(raw.to_string()),
        };

        // 2xx bodies can still carry an error object.
        if let Some(error) = &parsed.error {
            anyhow::bail!("Gemini error: {}", error.message);
        }

        Ok(extract_text(parsed, &raw))
    }
}
