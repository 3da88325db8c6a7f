use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::email::{dispatch, SendReceipt, SendRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub recipients: Vec<String>,
    pub subject: Option<String>,
    pub html: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub result: SendReceipt,
}

/// POST /api/send-email
pub async fn handle_send_email(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, AppError> {
    let Json(request) = payload?;
    let request = SendRequest {
        recipients: request.recipients,
        subject: request.subject,
        html: request.html,
        summary: request.summary,
    };
    let result = dispatch(state.mailer.as_ref(), &request).await?;
    Ok(Json(SendEmailResponse {
        success: true,
        result,
    }))
}
