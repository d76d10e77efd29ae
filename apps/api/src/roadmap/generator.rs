//! Roadmap generation pipeline.
//!
//! Flow: build prompt → pause → one completion call → parse JSON → normalize.
//! Nothing here is retried and nothing outlives the request.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, info};

use crate::config::DelayRange;
use crate::errors::AppError;
use crate::llm_client::{CompletionProvider, ResponseFormat};
use crate::roadmap::models::{Roadmap, UserProfile};
use crate::roadmap::normalizer::{normalize_roadmap, NumberingMode};
use crate::roadmap::prompts::build_roadmap_prompt;

/// How much of the raw completion is echoed to the debug log.
const RAW_LOG_PREVIEW_CHARS: usize = 500;

/// Per-request knobs taken from `Config` at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationOptions {
    pub delay: Option<DelayRange>,
    pub numbering: NumberingMode,
}

/// Runs the generation pipeline for one profile.
pub async fn generate_roadmap(
    provider: &dyn CompletionProvider,
    profile: &UserProfile,
    options: GenerationOptions,
) -> Result<Roadmap, AppError> {
    let prompt = build_roadmap_prompt(profile);

    if let Some(range) = options.delay {
        pause(range).await;
    }

    info!(
        "Sending roadmap prompt for aspiration: '{}'",
        profile.career_aspiration
    );
    let raw = provider
        .complete(prompt.system, &prompt.user, ResponseFormat::JsonObject)
        .await?;
    debug!(
        "Received raw completion: {}...",
        raw.chars().take(RAW_LOG_PREVIEW_CHARS).collect::<String>()
    );

    let payload: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        error!("Completion is not valid JSON ({e}). Faulty content: {raw}");
        AppError::InvalidJson(e)
    })?;

    let roadmap = normalize_roadmap(payload, options.numbering).map_err(|e| {
        error!("Completion failed schema check ({e}). Faulty content: {raw}");
        AppError::Schema(e)
    })?;

    info!(
        "Roadmap ready: {} steps, {} days",
        roadmap.path.len(),
        roadmap.total_estimated_days
    );
    Ok(roadmap)
}

/// Sleeps for a uniformly random duration inside `range`.
async fn pause(range: DelayRange) {
    let millis = rand::thread_rng().gen_range(range.min_ms..=range.max_ms);
    debug!("Pausing {millis}ms before completion call");
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
