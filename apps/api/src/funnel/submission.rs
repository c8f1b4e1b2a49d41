//! Input Validator: turns a raw request body into a well-formed `QuizSubmission`.
//!
//! Validation is an explicit construction step: the body is parsed into a
//! `serde_json::Value`, the list-or-string answers are normalized, and every
//! field is type-checked. All offending fields are reported together.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Separator used when a multi-select answer arrives as a list.
const LIST_SEPARATOR: &str = ", ";

/// A validated quiz submission. Every answer is a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSubmission {
    pub primary_goal: String,
    pub tech_skill: String,
    pub tools: String,
    pub budget: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("{}", .0.join("; "))]
    InvalidFields(Vec<String>),
}

impl QuizSubmission {
    /// Parses and validates a raw request body.
    ///
    /// An empty body is treated as an empty object, so it fails on the
    /// missing fields rather than on the JSON syntax.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body)
                .map_err(|e| ValidationError::MalformedBody(e.to_string()))?
        };

        Self::from_value(&value)
    }

    /// Validates an already-parsed JSON document.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject)?;
        let mut problems = Vec::new();

        let primary_goal = text_field(object, "primary_goal", &mut problems);
        let tech_skill = list_or_text_field(object, "tech_skill", &mut problems);
        let tools = text_field(object, "tools", &mut problems);
        let budget = list_or_text_field(object, "budget", &mut problems);

        match (primary_goal, tech_skill, tools, budget) {
            (Some(primary_goal), Some(tech_skill), Some(tools), Some(budget)) => Ok(Self {
                primary_goal,
                tech_skill,
                tools,
                budget,
            }),
            _ => Err(ValidationError::InvalidFields(problems)),
        }
    }
}

/// Collapses a list of strings into one comma-separated string.
///
/// Non-list values pass through untouched so the type check that follows
/// decides whether they are acceptable. A list holding anything other than
/// strings cannot be normalized and yields `None`.
pub fn normalize_list_or_text(value: &Value) -> Option<Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|parts| Value::String(parts.join(LIST_SEPARATOR))),
        other => Some(other.clone()),
    }
}

fn text_field(object: &Map<String, Value>, name: &str, problems: &mut Vec<String>) -> Option<String> {
    match object.get(name) {
        None | Some(Value::Null) => {
            problems.push(format!("{name}: field required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            problems.push(format!("{name}: expected a string, got {}", kind_of(other)));
            None
        }
    }
}

fn list_or_text_field(
    object: &Map<String, Value>,
    name: &str,
    problems: &mut Vec<String>,
) -> Option<String> {
    let Some(raw) = object.get(name).filter(|v| !v.is_null()) else {
        problems.push(format!("{name}: field required"));
        return None;
    };

    match normalize_list_or_text(raw) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            problems.push(format!(
                "{name}: expected a string or a list of strings, got {}",
                kind_of(&other)
            ));
            None
        }
        None => {
            problems.push(format!("{name}: list entries must all be strings"));
            None
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
