// src/llm/mod.rs

use anyhow::Result;
use async_trait::async_trait;

pub mod gemini;

pub use gemini::GeminiClient;

/// The external generative call: prompt in, text out, or failure.
///
/// The relay treats the model as opaque; this seam exists so the
/// orchestrator can be exercised against a stub in tests.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;
}
