use anyhow::{bail, Context, Result};

use crate::analysis::extractor::ExtractionStrategy;
use crate::analysis::orchestrator::MAX_DOCUMENT_BYTES;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout_secs: u64,
    pub extraction_strategy: ExtractionStrategy,
    /// Request body limit. Kept above the document ceiling so oversized
    /// uploads still reach the orchestrator and get a `FileTooLarge` envelope.
    pub max_request_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: optional_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS", 120u64)
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            extraction_strategy: std::env::var("EXTRACTION_STRATEGY")
                .ok()
                .map(|s| s.parse::<ExtractionStrategy>())
                .transpose()?
                .unwrap_or_default(),
            max_request_bytes: optional_env("MAX_REQUEST_BYTES", 16 * 1024 * 1024usize)
                .context("MAX_REQUEST_BYTES must be a byte count")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_request_bytes <= MAX_DOCUMENT_BYTES {
            bail!(
                "MAX_REQUEST_BYTES ({}) must exceed the {} byte document limit",
                self.max_request_bytes,
                MAX_DOCUMENT_BYTES
            );
        }
        if self.llm_timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}
