use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use summarizer::config::Config;
use summarizer::email::resend::ResendMailer;
use summarizer::llm_client::GeminiClient;
use summarizer::routes::build_router;
use summarizer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing credentials are fatal: the error propagates and the process exits non-zero.
    let config = Config::from_env().context("invalid configuration")?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting meeting summarizer API v{}", env!("CARGO_PKG_VERSION"));

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("creating upload dir {}", config.upload_dir.display()))?;
    info!("Upload directory: {}", config.upload_dir.display());

    let generator = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    info!("LLM client initialized (model: {})", generator.model());

    let mailer = ResendMailer::new(config.resend_api_key.clone(), config.email_from.clone());
    info!("Email client initialized (from: {})", config.email_from);

    let state = AppState {
        generator: Arc::new(generator),
        mailer: Arc::new(mailer),
        upload_dir: config.upload_dir.clone(),
    };

    // The browser UI is served from a different origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
