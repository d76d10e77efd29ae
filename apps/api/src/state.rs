use std::sync::Arc;

use crate::errors::AppError;
use crate::llm_client::CompletionProvider;
use crate::roadmap::generator::GenerationOptions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no credential was configured at startup.
    pub completion: Option<Arc<dyn CompletionProvider>>,
    pub generation: GenerationOptions,
}

impl AppState {
    /// The configured completion backend, or the fixed "not configured" error.
    pub fn completion(&self) -> Result<&dyn CompletionProvider, AppError> {
        self.completion
            .as_deref()
            .ok_or_else(AppError::not_configured)
    }
}
