//! Roadmap Normalizer — repairs whatever JSON the model produced into a
//! well-formed `Roadmap`.
//!
//! Rules, applied per step in order (1-based position `i`):
//! 1. `estimated_time_days` that is missing, non-integer or `<= 0` becomes `1`
//! 2. a title not starting with `<digits>.` becomes `"<i>. <title>"`
//! 3. a missing or empty description becomes `"Learn about <title>."`
//! 4. `type` and unknown keys pass through untouched
//!
//! `total_estimated_days` is always recomputed from the repaired steps.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::roadmap::models::{Roadmap, RoadmapStep};

/// Leading ordinal such as `"12."`, optionally followed by whitespace.
static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("ordinal prefix pattern is valid"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("LLM response is not a JSON object.")]
    NotAnObject,

    #[error("LLM response missing 'path' or 'total_estimated_days' keys.")]
    MissingKeys,

    #[error("LLM response 'path' is not an array.")]
    PathNotArray,

    #[error("LLM response step {0} is not an object.")]
    StepNotObject(usize),
}

/// How titles that already carry an ordinal are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberingMode {
    /// An existing `<digits>.` prefix is kept even if it disagrees with the
    /// step's position.
    #[default]
    TrustExisting,
    /// Every title is re-prefixed with its position; an existing ordinal is
    /// replaced.
    Renumber,
}

/// Normalizes a decoded completion payload into a `Roadmap`.
pub fn normalize_roadmap(raw: Value, mode: NumberingMode) -> Result<Roadmap, SchemaError> {
    let Value::Object(mut root) = raw else {
        return Err(SchemaError::NotAnObject);
    };

    if !root.contains_key("total_estimated_days") {
        return Err(SchemaError::MissingKeys);
    }
    let path = root.remove("path").ok_or(SchemaError::MissingKeys)?;
    root.remove("total_estimated_days");

    let Value::Array(raw_steps) = path else {
        return Err(SchemaError::PathNotArray);
    };

    let path = raw_steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| match step {
            Value::Object(fields) => Ok(normalize_step(fields, index + 1, mode)),
            _ => Err(SchemaError::StepNotObject(index + 1)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total_estimated_days = path
        .iter()
        .fold(0u64, |total, step| total.saturating_add(step.estimated_time_days));

    Ok(Roadmap {
        path,
        total_estimated_days,
        extra: root,
    })
}

fn normalize_step(mut fields: Map<String, Value>, position: usize, mode: NumberingMode) -> RoadmapStep {
    let estimated_time_days = fields
        .remove("estimated_time_days")
        .as_ref()
        .and_then(positive_days)
        .unwrap_or(1);

    let raw_title = fields.remove("title").map(text_of).unwrap_or_default();
    let title = number_title(&raw_title, position, mode);

    let description = fields
        .remove("description")
        .filter(|d| !is_blank(d))
        .map(text_of)
        .unwrap_or_else(|| format!("Learn about {title}."));

    let kind = fields.remove("type");

    RoadmapStep {
        title,
        description,
        estimated_time_days,
        kind,
        extra: fields,
    }
}

/// Accepts JSON integers above zero. Floats, strings, booleans and null do not count.
fn positive_days(value: &Value) -> Option<u64> {
    value.as_u64().filter(|&days| days > 0)
}

fn number_title(title: &str, position: usize, mode: NumberingMode) -> String {
    match mode {
        NumberingMode::TrustExisting if ORDINAL_PREFIX.is_match(title) => title.to_string(),
        NumberingMode::TrustExisting => prefix_title(position, title),
        NumberingMode::Renumber => prefix_title(position, &ORDINAL_PREFIX.replace(title, "")),
    }
}

fn prefix_title(position: usize, title: &str) -> String {
    format!("{position}. {title}")
}

/// Null, `""`, `[]`, `{}`, `false` and zero all count as no value.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Strings verbatim; null as empty; other values as their JSON text.
fn text_of(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn normalize(raw: Value) -> Roadmap {
        normalize_roadmap(raw, NumberingMode::TrustExisting).unwrap()
    }

    fn step(title: &str, days: Value) -> Value {
        json!({
            "title": title,
            "description": "Some description",
            "estimated_time_days": days,
            "type": "concept"
        })
    }

    #[test]
    fn test_rejects_non_object_payload() {
        for raw in [json!([]), json!("roadmap"), json!(3), Value::Null] {
            assert_eq!(
                normalize_roadmap(raw, NumberingMode::TrustExisting),
                Err(SchemaError::NotAnObject)
            );
        }
    }

    #[test]
    fn test_rejects_missing_path() {
        let err = normalize_roadmap(json!({"total_estimated_days": 3}), NumberingMode::default());
        assert_eq!(err, Err(SchemaError::MissingKeys));
    }

    #[test]
    fn test_rejects_missing_total() {
        let err = normalize_roadmap(json!({"path": []}), NumberingMode::default());
        assert_eq!(err, Err(SchemaError::MissingKeys));
    }

    #[test]
    fn test_null_total_is_present_and_recomputed() {
        let roadmap = normalize(json!({"path": [step("A", json!(2))], "total_estimated_days": null}));
        assert_eq!(roadmap.total_estimated_days, 2);
    }

    #[test]
    fn test_rejects_non_array_path_and_non_object_steps() {
        assert_eq!(
            normalize_roadmap(
                json!({"path": "oops", "total_estimated_days": 1}),
                NumberingMode::default()
            ),
            Err(SchemaError::PathNotArray)
        );
        assert_eq!(
            normalize_roadmap(
                json!({"path": [step("A", json!(1)), "B"], "total_estimated_days": 1}),
                NumberingMode::default()
            ),
            Err(SchemaError::StepNotObject(2))
        );
    }

    #[test]
    fn test_empty_path_totals_zero() {
        let roadmap = normalize(json!({"path": [], "total_estimated_days": 42}));
        assert!(roadmap.path.is_empty());
        assert_eq!(roadmap.total_estimated_days, 0);
        assert_eq!(
            serde_json::to_value(&roadmap).unwrap(),
            json!({"path": [], "total_estimated_days": 0})
        );
    }

    #[test]
    fn test_invalid_days_become_one() {
        let invalid = [json!(0), json!(-5), json!("three"), Value::Null, json!(2.5), json!(true)];
        for days in invalid {
            let roadmap = normalize(json!({"path": [step("A", days.clone())], "total_estimated_days": 0}));
            assert_eq!(roadmap.path[0].estimated_time_days, 1, "input {days}");
        }

        let missing = json!({"path": [{"title": "A", "description": "d"}], "total_estimated_days": 0});
        assert_eq!(normalize(missing).path[0].estimated_time_days, 1);
    }

    #[test]
    fn test_valid_days_are_kept() {
        let roadmap = normalize(json!({"path": [step("A", json!(14))], "total_estimated_days": 0}));
        assert_eq!(roadmap.path[0].estimated_time_days, 14);
    }

    #[test]
    fn test_total_ignores_supplied_value() {
        let roadmap = normalize(json!({
            "path": [step("A", json!(3)), step("B", json!(0)), step("C", json!(10))],
            "total_estimated_days": 999
        }));
        assert_eq!(roadmap.total_estimated_days, 3 + 1 + 10);
    }

    #[test]
    fn test_unnumbered_title_gets_positional_prefix() {
        let roadmap = normalize(json!({
            "path": [step("Basics", json!(1)), step("Trees", json!(1)), step("Intro to Graphs", json!(1))],
            "total_estimated_days": 3
        }));
        assert_eq!(roadmap.path[2].title, "3. Intro to Graphs");
        assert_eq!(roadmap.path[0].title, "1. Basics");
    }

    #[test]
    fn test_existing_prefix_is_trusted_even_when_wrong() {
        let roadmap = normalize(json!({"path": [step("7. Something", json!(1))], "total_estimated_days": 1}));
        assert_eq!(roadmap.path[0].title, "7. Something");
    }

    #[test]
    fn test_digits_without_dot_are_not_a_prefix() {
        let roadmap = normalize(json!({"path": [step("3D Graphics", json!(1))], "total_estimated_days": 1}));
        assert_eq!(roadmap.path[0].title, "1. 3D Graphics");
    }

    #[test]
    fn test_renumber_mode_replaces_existing_prefix() {
        let raw = json!({
            "path": [step("7. Something", json!(1)), step("Other", json!(1))],
            "total_estimated_days": 2
        });
        let roadmap = normalize_roadmap(raw, NumberingMode::Renumber).unwrap();
        assert_eq!(roadmap.path[0].title, "1. Something");
        assert_eq!(roadmap.path[1].title, "2. Other");
    }

    #[test]
    fn test_missing_description_uses_numbered_title() {
        let raw = json!({
            "path": [
                step("Basics", json!(1)),
                {"title": "Data Structures", "description": "", "estimated_time_days": 2, "type": "concept"}
            ],
            "total_estimated_days": 3
        });
        let roadmap = normalize(raw);
        assert_eq!(roadmap.path[1].description, "Learn about 2. Data Structures.");

        let raw = json!({"path": [{"title": "Git", "estimated_time_days": 1}], "total_estimated_days": 1});
        assert_eq!(normalize(raw).path[0].description, "Learn about 1. Git.");
    }

    #[test]
    fn test_missing_title_still_gets_number() {
        let roadmap = normalize(json!({"path": [{"estimated_time_days": 2}], "total_estimated_days": 2}));
        assert_eq!(roadmap.path[0].title, "1. ");
        assert_eq!(roadmap.path[0].description, "Learn about 1. .");

        let roadmap = normalize(json!({
            "path": [step("Intro", json!(1)), {"title": "", "description": "d", "estimated_time_days": 1}],
            "total_estimated_days": 2
        }));
        assert_eq!(roadmap.path[1].title, "2. ");

        let renumbered = normalize_roadmap(
            json!({"path": [{"title": "", "estimated_time_days": 1}], "total_estimated_days": 1}),
            NumberingMode::Renumber,
        )
        .unwrap();
        assert_eq!(renumbered.path[0].title, "1. ");
    }

    #[test]
    fn test_empty_non_string_description_is_synthesized() {
        for blank in [json!([]), json!({}), json!(false), json!(0), json!(0.0), Value::Null] {
            let raw = json!({
                "path": [{"title": "A", "description": blank.clone(), "estimated_time_days": 1}],
                "total_estimated_days": 1
            });
            assert_eq!(normalize(raw).path[0].description, "Learn about 1. A.", "input {blank}");
        }
    }

    #[test]
    fn test_non_empty_non_string_description_is_kept_as_json_text() {
        let raw = json!({
            "path": [{"title": "A", "description": ["read", "practice"], "estimated_time_days": 1}],
            "total_estimated_days": 1
        });
        assert_eq!(normalize(raw).path[0].description, r#"["read","practice"]"#);
    }

    #[test]
    fn test_kind_and_unknown_fields_pass_through() {
        let raw = json!({
            "path": [{
                "title": "Capstone",
                "description": "Build it",
                "estimated_time_days": 5,
                "type": "not-a-kind",
                "resources": ["book"]
            }],
            "total_estimated_days": 5,
            "summary": "keep me"
        });
        let out = serde_json::to_value(normalize(raw)).unwrap();
        assert_eq!(out["path"][0]["type"], "not-a-kind");
        assert_eq!(out["path"][0]["resources"], json!(["book"]));
        assert_eq!(out["summary"], "keep me");
    }

    #[test]
    fn test_missing_kind_is_omitted() {
        let raw = json!({"path": [{"title": "A", "description": "d", "estimated_time_days": 1}], "total_estimated_days": 1});
        let out = serde_json::to_value(normalize(raw)).unwrap();
        assert!(out["path"][0].get("type").is_none());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = json!({
            "path": [
                step("Learn Python", json!(0)),
                {"title": "4. Pandas", "description": null, "estimated_time_days": "two", "type": "project"},
                {"estimated_time_days": 3},
                step("Statistics", json!(6))
            ],
            "total_estimated_days": 1
        });

        for mode in [NumberingMode::TrustExisting, NumberingMode::Renumber] {
            let once = normalize_roadmap(raw.clone(), mode).unwrap();
            let twice = normalize_roadmap(serde_json::to_value(&once).unwrap(), mode).unwrap();
            assert_eq!(once, twice, "mode {mode:?}");
        }
    }

    #[test]
    fn test_upstream_example_normalizes_to_expected_shape() {
        let raw = json!({
            "path": [{"title": "Learn Python", "description": "", "estimated_time_days": 0, "type": "concept"}],
            "total_estimated_days": 99
        });
        assert_eq!(
            serde_json::to_value(normalize(raw)).unwrap(),
            json!({
                "path": [{
                    "title": "1. Learn Python",
                    "description": "Learn about 1. Learn Python.",
                    "estimated_time_days": 1,
                    "type": "concept"
                }],
                "total_estimated_days": 1
            })
        );
    }
}
