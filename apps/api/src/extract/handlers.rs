use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::{extract_text, FileKind, MAX_UPLOAD_BYTES};
use crate::state::AppState;

/// Multipart field carrying the upload.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub text: String,
}

/// POST /api/upload
///
/// The upload is written to a `NamedTempFile` inside the upload directory and
/// removed before the handler returns, on every path.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (file_name, data) = read_upload_field(&mut multipart).await?;

    let kind = FileKind::from_file_name(&file_name)?;
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge {
            limit: MAX_UPLOAD_BYTES,
        });
    }
    info!("Extracting {:?} upload ({} bytes)", kind, data.len());

    let temp = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(kind.suffix())
        .tempfile_in(&state.upload_dir)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("creating upload temp file: {e}")))?;

    let result = match tokio::fs::write(temp.path(), &data).await {
        Ok(()) => extract_text(kind, temp.path()).await.map_err(AppError::from),
        Err(e) => Err(AppError::Extraction(format!("writing upload: {e}"))),
    };

    if let Err(e) = temp.close() {
        warn!("Failed to remove upload temp file: {e}");
    }

    let text = result?;
    Ok(Json(UploadResponse { text }))
}

async fn read_upload_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok((file_name, data));
    }
    Err(AppError::Validation("No file uploaded".to_string()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge {
            limit: MAX_UPLOAD_BYTES,
        }
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}
