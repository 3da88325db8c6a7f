//! Email dispatch: renders a summary into the branded template and hands it
//! to the transactional email provider as a single multi-recipient message.
//!
//! Flow: validate recipients → resolve body (html > markdown > placeholder)
//! → wrap in template with send timestamp → one provider call → require an id.

pub mod handlers;
pub mod resend;
pub mod template;

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::email::template::{render_email_html, resolve_body};

pub const MAX_RECIPIENTS: usize = 10;
pub const DEFAULT_SUBJECT: &str = "Meeting Summary";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider did not return a delivery id")]
    MissingId,
}

/// One message, one shared body, every recipient on the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendReceipt {
    pub id: String,
}

/// The email provider seam. `Ok(None)` means the provider accepted the call
/// but returned no delivery id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, MailError>;
}

/// What the caller asked to send; every field is optional except recipients.
#[derive(Debug, Clone, Default)]
pub struct SendRequest {
    pub recipients: Vec<String>,
    pub subject: Option<String>,
    pub html: Option<String>,
    pub summary: Option<String>,
}

/// Trims, drops duplicates (first occurrence wins) and enforces 1..=10
/// well-formed addresses.
pub fn validate_recipients(recipients: &[String]) -> Result<Vec<String>, AppError> {
    let mut unique: Vec<String> = Vec::with_capacity(recipients.len());
    for raw in recipients {
        let address = raw.trim();
        if !is_plausible_address(address) {
            return Err(AppError::Validation(format!(
                "Invalid recipient address: '{address}'"
            )));
        }
        if !unique.iter().any(|a| a == address) {
            unique.push(address.to_string());
        }
    }

    if unique.is_empty() {
        return Err(AppError::Validation(
            "At least one recipient is required.".to_string(),
        ));
    }
    if unique.len() > MAX_RECIPIENTS {
        return Err(AppError::Validation(format!(
            "A maximum of {MAX_RECIPIENTS} recipients is allowed."
        )));
    }
    Ok(unique)
}

/// Shape check only: one `@`, non-empty local part and dotted domain, no whitespace.
pub fn is_plausible_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Builds the outgoing message without sending it.
pub fn compose(request: &SendRequest, recipients: Vec<String>, sent_at: &str) -> OutgoingEmail {
    let subject = request
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SUBJECT)
        .to_string();
    let body = resolve_body(request.html.as_deref(), request.summary.as_deref());

    OutgoingEmail {
        to: recipients,
        subject,
        html: render_email_html(&body, sent_at),
    }
}

/// Validates, renders and sends. No retry: the first provider failure is returned.
pub async fn dispatch(mailer: &dyn Mailer, request: &SendRequest) -> Result<SendReceipt, AppError> {
    let recipients = validate_recipients(&request.recipients)?;
    let sent_at = Local::now().format(template::TIMESTAMP_FORMAT).to_string();
    let email = compose(request, recipients, &sent_at);

    info!("Sending summary email to {} recipient(s)", email.to.len());
    let id = mailer
        .send(&email)
        .await?
        .filter(|id| !id.trim().is_empty())
        .ok_or(MailError::MissingId)?;

    info!("Email accepted by provider (id={id})");
    Ok(SendReceipt { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeMailer;

    fn addresses(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("person{i}@example.com")).collect()
    }

    #[test]
    fn test_recipient_bounds() {
        assert!(validate_recipients(&[]).is_err());
        assert_eq!(validate_recipients(&addresses(1)).unwrap().len(), 1);
        assert_eq!(validate_recipients(&addresses(10)).unwrap().len(), 10);
        assert!(validate_recipients(&addresses(11)).is_err());
    }

    #[test]
    fn test_recipients_trimmed_and_deduplicated() {
        let input = vec![
            " a@example.com".to_string(),
            "b@example.com".to_string(),
            "a@example.com ".to_string(),
        ];
        assert_eq!(
            validate_recipients(&input).unwrap(),
            vec!["a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn test_address_shapes() {
        assert!(is_plausible_address("ana@team.example.com"));
        for bad in ["", "ana", "ana@", "@example.com", "a@b@c.com", "ana@localhost", "a b@c.com", "ana@.com"] {
            assert!(!is_plausible_address(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_compose_defaults_subject() {
        let request = SendRequest {
            recipients: addresses(1),
            subject: Some("   ".into()),
            summary: Some("hi".into()),
            ..Default::default()
        };
        let email = compose(&request, addresses(1), "now");
        assert_eq!(email.subject, DEFAULT_SUBJECT);
    }

    #[tokio::test]
    async fn test_dispatch_sends_one_shared_message() {
        let mailer = FakeMailer::accepting("msg_123");
        let request = SendRequest {
            recipients: addresses(3),
            subject: Some("Weekly sync".into()),
            summary: Some("**bold**".into()),
            ..Default::default()
        };
        let receipt = dispatch(&mailer, &request).await.unwrap();
        assert_eq!(receipt.id, "msg_123");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, addresses(3));
        assert_eq!(sent[0].subject, "Weekly sync");
        assert!(sent[0].html.contains("<strong>bold</strong>"));
        assert!(sent[0].html.contains("Sent on "));
    }

    #[tokio::test]
    async fn test_dispatch_without_id_fails() {
        let mailer = FakeMailer::without_id();
        let request = SendRequest {
            recipients: addresses(1),
            ..Default::default()
        };
        let err = dispatch(&mailer, &request).await.unwrap_err();
        assert!(matches!(err, AppError::SendFailed(_)));
    }

    #[tokio::test]
    async fn test_dispatch_validation_precedes_provider() {
        let mailer = FakeMailer::accepting("unused");
        let request = SendRequest {
            recipients: addresses(11),
            ..Default::default()
        };
        assert!(matches!(
            dispatch(&mailer, &request).await.unwrap_err(),
            AppError::Validation(_)
        ));
        assert!(mailer.sent().is_empty());
    }
}
