use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_KNOWLEDGE_LEVEL: &str = "unknown";
pub const DEFAULT_CAREER_ASPIRATION: &str = "a technology professional";
pub const DEFAULT_HOURS_PER_DAY: f64 = 2.0;

// ────────────────────────────────────────────────────────────────────────────
// Input
// ────────────────────────────────────────────────────────────────────────────

/// Raw body of `POST /generate-learning-path`. Every field is optional and
/// loosely typed; `UserProfile::from` applies defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileRequest {
    #[serde(rename = "knowledgeLevel", default)]
    pub knowledge_level: Option<Value>,
    #[serde(rename = "careerAspirations", default)]
    pub career_aspirations: Option<Value>,
    #[serde(rename = "availableTimePerDay", default)]
    pub available_time_per_day: Option<Value>,
}

/// Who the roadmap is for. Request-scoped, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub knowledge_level: String,
    pub career_aspiration: String,
    /// Study hours per day, always positive.
    pub available_time_per_day: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            knowledge_level: DEFAULT_KNOWLEDGE_LEVEL.to_string(),
            career_aspiration: DEFAULT_CAREER_ASPIRATION.to_string(),
            available_time_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

impl From<ProfileRequest> for UserProfile {
    fn from(req: ProfileRequest) -> Self {
        let defaults = UserProfile::default();
        Self {
            knowledge_level: req
                .knowledge_level
                .map(value_as_text)
                .unwrap_or(defaults.knowledge_level),
            career_aspiration: req
                .career_aspirations
                .map(value_as_text)
                .unwrap_or(defaults.career_aspiration),
            available_time_per_day: req
                .available_time_per_day
                .and_then(|v| value_as_hours(&v))
                .unwrap_or(defaults.available_time_per_day),
        }
    }
}

/// Strings are taken verbatim; anything else is embedded as its JSON text.
fn value_as_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn value_as_hours(value: &Value) -> Option<f64> {
    let hours = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (hours.is_finite() && hours > 0.0).then_some(hours)
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// The four step kinds the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Concept,
    Project,
    Assessment,
    Info,
}

impl StepKind {
    pub const ALL: [StepKind; 4] = [
        StepKind::Concept,
        StepKind::Project,
        StepKind::Assessment,
        StepKind::Info,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Concept => "concept",
            StepKind::Project => "project",
            StepKind::Assessment => "assessment",
            StepKind::Info => "info",
        }
    }
}

/// One step of a normalized roadmap.
///
/// `kind` is passed through exactly as the model produced it. Unknown keys
/// the model added are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub estimated_time_days: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A normalized learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    pub path: Vec<RoadmapStep>,
    /// Always the sum of `estimated_time_days` over `path`.
    pub total_estimated_days: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
