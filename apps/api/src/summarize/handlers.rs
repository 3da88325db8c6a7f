use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::summarize::summarize;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub transcript: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// POST /api/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let Json(request) = payload?;
    let summary = summarize(
        state.generator.as_ref(),
        request.transcript.as_deref().unwrap_or_default(),
        request.instruction.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok(Json(SummarizeResponse { summary }))
}
