use anyhow::{Context, Result};
use std::time::Duration;
use tracing::warn;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// API keys are optional at startup. Endpoints that need a missing key fail
/// with a configuration error when called.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub hf_api_key: Option<String>,
    pub openai_base_url: String,
    pub hf_base_url: String,
    pub service_timeout: Duration,
    pub extraction_timeout: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            hf_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            hf_base_url: DEFAULT_HF_BASE_URL.to_string(),
            service_timeout: Duration::from_secs(120),
            extraction_timeout: Duration::from_secs(30),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            hf_api_key: optional_env("HF_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            hf_base_url: optional_env("HF_BASE_URL").unwrap_or(defaults.hf_base_url),
            service_timeout: parse_env("SERVICE_TIMEOUT_SECS", 120u64)
                .map(Duration::from_secs)?,
            extraction_timeout: parse_env("EXTRACTION_TIMEOUT_SECS", 30u64)
                .map(Duration::from_secs)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Logs one warning per missing provider key. Called once at startup.
    pub fn warn_missing_keys(&self) {
        if self.openai_api_key.is_none() {
            warn!(
                "OPENAI_API_KEY not set. Text-to-audio and code explanation will be unavailable."
            );
        }
        if self.hf_api_key.is_none() {
            warn!("HF_API_KEY not set. Text-to-image and summarization will be unavailable.");
        }
    }
}

/// Reads an env var, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>()))
}
