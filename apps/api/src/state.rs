use std::path::PathBuf;
use std::sync::Arc;

use crate::email::Mailer;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Provider handles are trait objects built once in `main`; tests swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub mailer: Arc<dyn Mailer>,
    /// Where uploads live for the duration of one request.
    pub upload_dir: PathBuf,
}
