//! Resend (resend.com) transport for outgoing summary emails.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::email::{MailError, Mailer, OutgoingEmail};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, MailError> {
        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&ResendRequest {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ResendResponse = response.json().await?;
        Ok(parsed.id)
    }
}
