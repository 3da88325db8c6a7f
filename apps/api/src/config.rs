use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required environment variable '{key}' is not set")]
    Missing { key: &'static str },

    #[error("Environment variable '{key}' is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration loaded from environment variables.
/// Validation happens once at startup; `main` decides how to exit on failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub resend_api_key: String,
    pub email_from: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be tested
    /// without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| optional(key).ok_or(ConfigError::Missing { key });

        let port = match optional("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_model: optional("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            resend_api_key: require("RESEND_API_KEY")?,
            email_from: require("EMAIL_FROM")?,
            port,
            upload_dir: optional("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
