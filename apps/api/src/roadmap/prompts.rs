//! Prompt Builder for roadmap generation.
//!
//! Pure: a `UserProfile` goes in, the system message and the user prompt
//! come out. The response schema is embedded in the prompt so the model can
//! check its own output.

use serde_json::{json, Value};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::roadmap::models::{StepKind, UserProfile};

/// System message sent with every roadmap completion.
pub const ROADMAP_SYSTEM: &str = "You are an expert career coach generating personalized \
    learning roadmaps in strict JSON format, paying close attention to the user's prior knowledge.";

/// A fully rendered prompt pair.
#[derive(Debug, Clone)]
pub struct RoadmapPrompt {
    pub system: &'static str,
    pub user: String,
}

/// JSON schema the model must follow.
pub fn response_schema() -> Value {
    let kinds: Vec<&str> = StepKind::ALL.iter().map(|k| k.as_str()).collect();
    json!({
        "type": "object",
        "properties": {
            "path": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {"type": "string"},
                        "description": {"type": "string"},
                        "estimated_time_days": {"type": "integer"},
                        "type": {"type": "string", "enum": kinds}
                    },
                    "required": ["title", "description", "estimated_time_days", "type"]
                }
            },
            "total_estimated_days": {"type": "integer"}
        },
        "required": ["path", "total_estimated_days"]
    })
}

/// Builds the roadmap prompt. Profile values are inserted as opaque text.
pub fn build_roadmap_prompt(profile: &UserProfile) -> RoadmapPrompt {
    let schema = response_schema();
    let schema_json = serde_json::to_string_pretty(&schema).unwrap_or_else(|_| schema.to_string());

    let user = format!(
        r#"You are an elite career coach and AI roadmap designer. Your job is to carefully review and analyze the user's background, goals, and constraints before generating a learning roadmap.

First, deeply analyze the user's input:
- Current Knowledge Level: "{knowledge_level}"
- Career Aspiration/Goal: "{career_aspiration}"
- Hours per day available for study: {hours_per_day}

Use this analysis to create a highly personalized, realistic, and actionable step-by-step roadmap. Your roadmap must:
1. Be tailored to the user's starting point, strengths, and gaps. Do not repeat what the user already knows.
2. Include only the most relevant concepts, projects, and assessments for the user's goal.
3. Provide a realistic timeline for each step and for the overall journey, based on the user's available time per day and the true effort required for mastery.
4. Clearly explain why each step is included and how it helps the user progress toward their goal.
5. Be concise, logical, and motivating. Avoid generic advice.
6. The roadmap should be top notch: actionable, clear, and tailored for maximum impact.
7. Use the following strict JSON schema for your response:
{schema_json}

{JSON_ONLY_INSTRUCTION}"#,
        knowledge_level = profile.knowledge_level,
        career_aspiration = profile.career_aspiration,
        hours_per_day = format_hours(profile.available_time_per_day),
    );

    RoadmapPrompt {
        system: ROADMAP_SYSTEM,
        user,
    }
}

/// `3.0` renders as `3`, `2.5` as `2.5`.
fn format_hours(hours: f64) -> String {
    format!("{hours}")
}
