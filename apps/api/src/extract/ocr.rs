//! Optical character recognition via the `tesseract` CLI.

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::extract::ExtractError;

const TESSERACT_BIN: &str = "tesseract";

/// Runs `tesseract <image> stdout -l <lang>` and returns the recognized text.
pub async fn recognize(image: &Path, lang: &str) -> Result<String, ExtractError> {
    let output = Command::new(TESSERACT_BIN)
        .arg(image)
        .arg("stdout")
        .arg("-l")
        .arg(lang)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| ExtractError::Ocr(format!("failed to run {TESSERACT_BIN}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::Ocr(format!(
            "{TESSERACT_BIN} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!("OCR recognized {} chars", text.len());
    Ok(text)
}
