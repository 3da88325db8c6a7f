//! LLM Client: the single point of entry for all language-model calls.
//!
//! ARCHITECTURAL RULE: No other module may call the model provider directly.
//! Callers depend on the `TextGenerator` trait; `GeminiClient` is the one
//! production backend.
//!
//! One request per call. No retries, no streaming, no local timeout.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that turns a single prompt into generated text.
///
/// `Ok(None)` means the provider answered but produced no text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub output_tokens: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    /// Returns `None` when there is no non-empty text.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Wraps the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to the provider, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{}:generateContent", self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_error_message(body),
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_tokens, usage.output_tokens
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        Ok(self.call(prompt).await?.text())
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn parse_error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
