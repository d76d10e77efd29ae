mod config;
mod errors;
mod llm_client;
mod roadmap;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::roadmap::generator::GenerationOptions;
use crate::roadmap::normalizer::NumberingMode;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, not on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Roadmap API v{}", env!("CARGO_PKG_VERSION"));

    let completion = build_completion(&config);

    let generation = GenerationOptions {
        delay: config.request_delay,
        numbering: if config.strict_step_numbering {
            NumberingMode::Renumber
        } else {
            NumberingMode::TrustExisting
        },
    };
    info!("Generation options: {generation:?}");

    let state = AppState {
        completion,
        generation,
    };

    info!("Serving static files from {}", config.static_dir.display());
    let app = build_router(state, &config.static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the completion backend, or `None` when it cannot be used.
/// The server keeps running either way.
fn build_completion(config: &Config) -> Option<Arc<dyn CompletionProvider>> {
    let Some(api_key) = config.groq_api_key.clone() else {
        error!("GROQ_API_KEY environment variable not set; roadmap generation is disabled");
        return None;
    };

    if config.completion_timeout.is_none() {
        warn!("No COMPLETION_TIMEOUT_SECS set; completion calls will wait indefinitely");
    }

    match LlmClient::new(
        api_key,
        config.groq_api_url.clone(),
        config.completion_timeout,
    ) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Error initializing LLM client: {e}");
            None
        }
    }
}
