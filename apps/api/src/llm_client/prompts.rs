// Cross-cutting prompt fragments shared by every completion call.
// Feature-specific prompts live next to the feature (see roadmap::prompts).

/// Trailing instruction that keeps the model from wrapping its answer.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Only output the JSON object, with no extra text or formatting.";
