//! Summarization: turns a transcript and an instruction into Markdown.
//!
//! Flow: validate inputs → build the combined prompt → one model call →
//! return the text verbatim (or the fixed fallback when the model is silent).

pub mod handlers;
pub mod prompts;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::summarize::prompts::{build_summary_prompt, EMPTY_SUMMARY_FALLBACK};

/// Runs one summarization.
///
/// Inputs are checked before anything goes over the network: a blank
/// transcript or instruction never reaches the model.
pub async fn summarize(
    generator: &dyn TextGenerator,
    transcript: &str,
    instruction: &str,
) -> Result<String, AppError> {
    if transcript.trim().is_empty() || instruction.trim().is_empty() {
        return Err(AppError::MissingInput(
            "Transcript and instruction are required.".to_string(),
        ));
    }

    let prompt = build_summary_prompt(transcript, instruction);
    info!(
        "Summarizing transcript ({} chars) with instruction ({} chars)",
        transcript.len(),
        instruction.len()
    );

    match generator.generate(&prompt).await? {
        Some(summary) => Ok(summary),
        None => {
            warn!("Model returned no text; using fallback summary");
            Ok(EMPTY_SUMMARY_FALLBACK.to_string())
        }
    }
}
