/// GET /health
/// Plain-text liveness probe. Touches nothing else.
pub async fn health_handler() -> &'static str {
    "OK"
}
