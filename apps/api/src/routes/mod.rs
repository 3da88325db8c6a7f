pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::email::handlers::handle_send_email;
use crate::extract::handlers::handle_upload;
use crate::extract::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::summarize::handlers::handle_summarize;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/summarize", post(handle_summarize))
        .route(
            "/api/upload",
            post(handle_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD)),
        )
        .route("/api/send-email", post(handle_send_email))
        .with_state(state)
}
