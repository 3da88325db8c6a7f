//! Text extraction: turns an uploaded file into plain text.
//!
//! Dispatch is by the extension the client claims in the file name:
//! `.txt` is read directly, `.pdf` goes through `pdf-extract`, and
//! `.jpg`/`.jpeg` go through Tesseract OCR. Content is never sniffed.

pub mod handlers;
pub mod ocr;

use std::path::Path;

use thiserror::Error;
use tracing::warn;

/// Uploads above this size are rejected before extraction runs.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Language passed to the OCR engine.
pub const OCR_LANGUAGE: &str = "eng";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type '{0}'")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("OCR failed: {0}")]
    Ocr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Pdf,
    Image,
}

impl FileKind {
    /// Classifies a client-supplied file name by its (case-insensitive) extension.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(FileKind::Text),
            "pdf" => Ok(FileKind::Pdf),
            "jpg" | "jpeg" => Ok(FileKind::Image),
            _ if ext.is_empty() => Err(ExtractError::Unsupported("(none)".to_string())),
            _ => Err(ExtractError::Unsupported(format!(".{ext}"))),
        }
    }

    /// Suffix used for the temporary copy; OCR tooling keys off it.
    pub fn suffix(self) -> &'static str {
        match self {
            FileKind::Text => ".txt",
            FileKind::Pdf => ".pdf",
            FileKind::Image => ".jpg",
        }
    }
}

/// Extracts plain text from the file at `path`, treating it as `kind`.
pub async fn extract_text(kind: FileKind, path: &Path) -> Result<String, ExtractError> {
    match kind {
        FileKind::Text => {
            let bytes = tokio::fs::read(path).await?;
            Ok(decode_text(bytes))
        }
        FileKind::Pdf => {
            let bytes = tokio::fs::read(path).await?;
            extract_pdf_text(bytes).await
        }
        FileKind::Image => ocr::recognize(path, OCR_LANGUAGE).await,
    }
}

fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("Uploaded text file is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// `pdf-extract` is synchronous and can panic on malformed input, so it runs
/// on the blocking pool and a panic is reported as an extraction failure.
async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
    })
    .await
    .map_err(|e| ExtractError::Pdf(format!("PDF parser aborted: {e}")))?
}
