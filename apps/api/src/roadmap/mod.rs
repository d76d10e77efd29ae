// Roadmap generation: prompt building, the completion round trip and the
// normalization pass that repairs whatever the model returned.
// All completion calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
