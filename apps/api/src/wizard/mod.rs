//! Wizard: the three-step client flow (Upload → Instruction → Summary).
//!
//! All state lives here, on the client side; every forward action that needs
//! the backend issues exactly one call through `BackendApi`. Backward moves
//! are always allowed; forward moves require the current step's input.

pub mod client;
pub mod recipients;

use thiserror::Error;
use tracing::info;

use crate::email::template::markdown_to_html;
use crate::extract::FileKind;
use crate::summarize::prompts::EMPTY_SUMMARY_FALLBACK;
use crate::wizard::client::{BackendApi, EmailPayload};
use crate::wizard::recipients::{AddOutcome, RecipientList};

pub const PRESET_INSTRUCTIONS: [&str; 6] = [
    "Summarize in bullet points for executives",
    "Extract only action items with owners and deadlines",
    "Create a detailed meeting recap with key decisions",
    "Highlight important takeaways and next steps",
    "Focus on technical discussions and requirements",
    "Extract financial discussions and budget items",
];

pub const EMAIL_SUBJECT: &str = "Your AI Meeting Summary";
pub const UNSUPPORTED_UPLOAD_MESSAGE: &str =
    "Unsupported file type. Please upload a .txt, .pdf, .jpg, or .jpeg file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Instruction,
    Summary,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("a transcript is required before continuing")]
    TranscriptRequired,

    #[error("an instruction is required before generating")]
    InstructionRequired,

    #[error("not available on the {0:?} step")]
    WrongStep(Step),

    #[error("there is no preset #{}", .0 + 1)]
    UnknownPreset(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn success(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            description: description.into(),
        }
    }

    fn error(title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

pub struct Wizard<B> {
    backend: B,
    step: Step,
    transcript: String,
    instruction: String,
    summary: String,
    upload_error: Option<String>,
    recipients: RecipientList,
}

impl<B: BackendApi> Wizard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            step: Step::Upload,
            transcript: String::new(),
            instruction: String::new(),
            summary: String::new(),
            upload_error: None,
            recipients: RecipientList::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    pub fn recipients(&self) -> &[String] {
        self.recipients.as_slice()
    }

    // ── Upload ──────────────────────────────────────────────────────────────

    pub fn set_transcript(&mut self, text: impl Into<String>) {
        self.transcript = text.into();
    }

    /// Uploads a file and replaces the transcript with the extracted text.
    ///
    /// Failures land in `upload_error` and leave the transcript untouched so
    /// manual entry is never blocked.
    pub async fn upload_file(&mut self, file_name: &str, content: Vec<u8>) -> Result<(), WizardError> {
        self.require_step(Step::Upload)?;
        self.upload_error = None;

        if FileKind::from_file_name(file_name).is_err() {
            self.upload_error = Some(UNSUPPORTED_UPLOAD_MESSAGE.to_string());
            return Ok(());
        }

        match self.backend.upload(file_name, content).await {
            Ok(text) => {
                info!("Extracted {} chars from {file_name}", text.len());
                self.transcript = text;
            }
            Err(e) => self.upload_error = Some(e.to_string()),
        }
        Ok(())
    }

    pub fn continue_to_instruction(&mut self) -> Result<(), WizardError> {
        self.require_step(Step::Upload)?;
        if self.transcript.trim().is_empty() {
            return Err(WizardError::TranscriptRequired);
        }
        self.step = Step::Instruction;
        Ok(())
    }

    // ── Instruction ─────────────────────────────────────────────────────────

    pub fn set_instruction(&mut self, text: impl Into<String>) {
        self.instruction = text.into();
    }

    /// Fills the instruction with preset `index` (zero-based).
    pub fn apply_preset(&mut self, index: usize) -> Result<(), WizardError> {
        let preset = PRESET_INSTRUCTIONS
            .get(index)
            .ok_or(WizardError::UnknownPreset(index))?;
        self.instruction = preset.to_string();
        Ok(())
    }

    /// Calls the summarizer and moves to Summary whatever the outcome; a
    /// failure becomes the summary text, prefixed `Error:`.
    pub async fn generate(&mut self) -> Result<(), WizardError> {
        self.require_step(Step::Instruction)?;
        if self.instruction.trim().is_empty() {
            return Err(WizardError::InstructionRequired);
        }

        self.summary = match self
            .backend
            .summarize(&self.transcript, &self.instruction)
            .await
        {
            Ok(summary) if summary.is_empty() => EMPTY_SUMMARY_FALLBACK.to_string(),
            Ok(summary) => summary,
            Err(e) => format!("Error: {e}"),
        };
        self.step = Step::Summary;
        Ok(())
    }

    // ── Summary ─────────────────────────────────────────────────────────────

    /// Replaces the raw Markdown; the preview is always derived from it.
    pub fn set_summary(&mut self, markdown: impl Into<String>) {
        self.summary = markdown.into();
    }

    pub fn preview_html(&self) -> String {
        markdown_to_html(&self.summary)
    }

    /// Returns the text to place on the clipboard and the confirmation toast.
    pub fn copy_summary(&self) -> (String, Notification) {
        (
            self.summary.clone(),
            Notification::success(
                "Copied to clipboard",
                "Summary has been copied to your clipboard",
            ),
        )
    }

    /// Commits typed recipient input (Enter or comma separated).
    /// Returns a notification only when the list is already full.
    pub fn add_recipients(&mut self, input: &str) -> Option<Notification> {
        let full = self
            .recipients
            .add_from_input(input)
            .into_iter()
            .any(|(_, outcome)| outcome == AddOutcome::Full);
        full.then(|| {
            Notification::error(
                "Too many recipients",
                format!(
                    "A summary can be shared with at most {} recipients",
                    crate::email::MAX_RECIPIENTS
                ),
            )
        })
    }

    pub fn remove_recipient(&mut self, address: &str) -> bool {
        self.recipients.remove(address)
    }

    /// Sends the current summary to every chip; clears the chips on success.
    pub async fn send(&mut self) -> Result<Notification, WizardError> {
        self.require_step(Step::Summary)?;
        if self.recipients.is_empty() {
            return Ok(Notification::error(
                "No recipients",
                "Please add at least one email address",
            ));
        }

        let payload = EmailPayload {
            recipients: self.recipients.as_slice().to_vec(),
            subject: EMAIL_SUBJECT.to_string(),
            summary: self.summary.clone(),
        };

        match self.backend.send_email(&payload).await {
            Ok(_) => {
                let n = payload.recipients.len();
                self.recipients.clear();
                Ok(Notification::success(
                    "Emails sent successfully!",
                    format!(
                        "Summary shared with {n} recipient{}",
                        if n > 1 { "s" } else { "" }
                    ),
                ))
            }
            Err(e) => Ok(Notification::error("Failed to send email", e.to_string())),
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Summary → Instruction → Upload. Inputs are kept.
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.step = match self.step {
            Step::Upload => return Err(WizardError::WrongStep(Step::Upload)),
            Step::Instruction => Step::Upload,
            Step::Summary => Step::Instruction,
        };
        Ok(())
    }

    fn require_step(&self, step: Step) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep(self.step))
        }
    }
}
