use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_API_URL;

/// Bounds of the random pause taken before every completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

/// Application configuration loaded from environment variables.
///
/// The completion credential is optional on purpose: without it the service
/// still starts, serves static files and answers every generation request
/// with the "Backend not configured" error.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub static_dir: PathBuf,
    /// `None` disables the pre-completion delay.
    pub request_delay: Option<DelayRange>,
    /// `None` leaves the HTTP client without a timeout.
    pub completion_timeout: Option<Duration>,
    pub strict_step_numbering: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_delay = {
            let min_ms = parse_or(&get, "REQUEST_DELAY_MIN_MS", 1000u64)?;
            let max_ms = parse_or(&get, "REQUEST_DELAY_MAX_MS", 2500u64)?;
            if min_ms > max_ms {
                bail!("REQUEST_DELAY_MIN_MS ({min_ms}) must not exceed REQUEST_DELAY_MAX_MS ({max_ms})");
            }
            (max_ms > 0).then_some(DelayRange { min_ms, max_ms })
        };

        let completion_timeout = get("COMPLETION_TIMEOUT_SECS")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .context("COMPLETION_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        Ok(Config {
            groq_api_key: get("GROQ_API_KEY").map(|v| v.trim().to_string()),
            groq_api_url: get("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            port: parse_or(&get, "PORT", 5000u16).context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            request_delay,
            completion_timeout,
            strict_step_numbering: parse_or(&get, "STRICT_STEP_NUMBERING", false)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
