//! Backend seam for the wizard: the three capabilities it calls over HTTP.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::email::handlers::SendEmailResponse;
use crate::extract::handlers::{UploadResponse, UPLOAD_FIELD};
use crate::summarize::handlers::SummarizeResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx reply; `message` is the body's `error` field when present.
    #[error("{message}")]
    Server { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailPayload {
    pub recipients: Vec<String>,
    pub subject: String,
    pub summary: String,
}

#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String, ClientError>;
    async fn summarize(&self, transcript: &str, instruction: &str) -> Result<String, ClientError>;
    /// Returns the provider's delivery id.
    async fn send_email(&self, payload: &EmailPayload) -> Result<String, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to the summarizer API at `base_url` (no trailing slash needed).
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turns a non-2xx response into `ClientError::Server`, preferring the JSON `error` field.
async fn check(response: Response, fallback: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| fallback.to_string());
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<String, ClientError> {
        let part = multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);
        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let body: UploadResponse = check(response, "Failed to extract text").await?.json().await?;
        Ok(body.text)
    }

    async fn summarize(&self, transcript: &str, instruction: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/api/summarize"))
            .json(&json!({ "transcript": transcript, "instruction": instruction }))
            .send()
            .await?;
        let body: SummarizeResponse = check(response, "Failed to generate summary")
            .await?
            .json()
            .await?;
        Ok(body.summary)
    }

    async fn send_email(&self, payload: &EmailPayload) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/api/send-email"))
            .json(payload)
            .send()
            .await?;
        let body: SendEmailResponse = check(response, "Failed to send email").await?.json().await?;
        Ok(body.result.id)
    }
}
