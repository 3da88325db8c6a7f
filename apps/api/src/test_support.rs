//! Fakes for the provider seams, shared by unit and router tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::email::{MailError, Mailer, OutgoingEmail};
use crate::llm_client::{LlmError, TextGenerator};
use crate::state::AppState;

enum Reply {
    Text(String),
    Silent,
    Fail { status: u16, message: String },
}

pub struct FakeGenerator {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self::with(Reply::Text(text.to_string()))
    }

    pub fn silent() -> Self {
        Self::with(Reply::Silent)
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::with(Reply::Fail {
            status,
            message: message.to_string(),
        })
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(Some(text.clone())),
            Reply::Silent => Ok(None),
            Reply::Fail { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

pub struct FakeMailer {
    id: Option<String>,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeMailer {
    pub fn accepting(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn without_id() -> Self {
        Self {
            id: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Option<String>, MailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(self.id.clone())
    }
}

pub fn test_state(
    generator: Arc<FakeGenerator>,
    mailer: Arc<FakeMailer>,
    upload_dir: &Path,
) -> AppState {
    AppState {
        generator,
        mailer,
        upload_dir: upload_dir.to_path_buf(),
    }
}

pub const BOUNDARY: &str = "summarizer-test-boundary";

/// Builds a multipart/form-data body with a single file field.
pub fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A one-page PDF with a single Helvetica text run, xref offsets computed.
pub fn minimal_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}
