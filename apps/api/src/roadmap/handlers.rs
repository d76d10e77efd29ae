//! Axum route handler for roadmap generation.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::roadmap::generator::generate_roadmap;
use crate::roadmap::models::{ProfileRequest, Roadmap, UserProfile};
use crate::state::AppState;

/// POST /generate-learning-path
///
/// Fails fast when no completion backend is configured, before the body is
/// even looked at. Any body that is absent, not JSON, or not a JSON object
/// is a 400.
pub async fn handle_generate_learning_path(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Roadmap>, AppError> {
    let provider = state.completion()?;

    let profile = parse_profile(body)?;
    info!("Received roadmap request: {profile:?}");

    let roadmap = generate_roadmap(provider, &profile, state.generation).await?;

    Ok(Json(roadmap))
}

fn parse_profile(body: Result<Json<Value>, JsonRejection>) -> Result<UserProfile, AppError> {
    let Ok(Json(value @ Value::Object(_))) = body else {
        return Err(AppError::BadRequest);
    };

    let request: ProfileRequest =
        serde_json::from_value(value).map_err(|_| AppError::BadRequest)?;

    Ok(UserProfile::from(request))
}
