//! Locates the JSON object embedded in a model reply and turns it into a
//! candidate record for validation.
//!
//! Three heuristics are tried in order and the first one that finds a
//! candidate wins:
//!
//! 1. a fenced code block (optionally tagged `json`) wrapping a `{...}` object,
//! 2. the span from the first `{` to the last `}`,
//! 3. the whole trimmed reply.
//!
//! Only the chosen candidate is parsed. If a fenced block is found but its
//! contents are not valid JSON the reply is rejected; the brace span is not
//! tried as a second chance.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::Value;

use crate::error::{FieldProblem, FieldViolation, RecipeError, SchemaViolations};

/// Fenced block with an optional `json` tag whose body is a `{...}` object.
/// The body match is lazy, so it stops at the first `}` followed by a fence.
static FENCED_OBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("fenced object regex is valid")
});

/// Which heuristic produced the JSON candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    FencedBlock,
    BraceSpan,
    WholeText,
}

/// Find the substring that should hold the recipe JSON. Never fails; the
/// last resort is the whole trimmed text.
pub fn locate_json(text: &str) -> (ExtractionPath, &str) {
    let text = text.trim();

    if let Some(body) = FENCED_OBJECT_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
    {
        return (ExtractionPath::FencedBlock, body.as_str());
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end > start {
            return (ExtractionPath::BraceSpan, &text[start..=end]);
        }
    }

    (ExtractionPath::WholeText, text)
}

/// Parse the first JSON candidate found in `text`.
pub fn extract_json(text: &str) -> Result<Value, RecipeError> {
    let (path, candidate) = locate_json(text);
    debug!(
        "Parsing {} byte JSON candidate found via {:?}",
        candidate.len(),
        path
    );
    Ok(serde_json::from_str(candidate)?)
}

/// Extract the JSON object from a model reply as a [`CandidateRecord`].
///
/// Fails with [`RecipeError::MalformedOutput`] when the candidate is not
/// valid JSON, and with [`RecipeError::SchemaValidation`] on the `(root)`
/// field when it is valid JSON but not an object.
pub fn extract_candidate(text: &str) -> Result<CandidateRecord, RecipeError> {
    CandidateRecord::from_json(extract_json(text)?)
}

/// A JSON value reduced to the shapes recipe fields can take
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Any integral number; wide enough to hold every JSON integer serde_json parses
    Integer(i128),
    TextList(Vec<String>),
    /// Anything else; keeps a description of the JSON kind for error messages
    Unsupported(&'static str),
}

impl FieldValue {
    /// Human readable name of the shape, used in validation messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::TextList(_) => "list of strings",
            FieldValue::Unsupported(kind) => kind,
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Text(text),
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    FieldValue::Integer(i128::from(integer))
                } else if let Some(integer) = number.as_u64() {
                    FieldValue::Integer(i128::from(integer))
                } else {
                    // 10.0 is an integer written as a float; 10.5 is not.
                    // Integers too large for u64 arrive here as floats too.
                    match number.as_f64() {
                        // The cast saturates beyond i128, which stays out of any range
                        Some(float) if float.is_finite() && float.fract() == 0.0 => {
                            FieldValue::Integer(float as i128)
                        }
                        _ => FieldValue::Unsupported("non-integer number"),
                    }
                }
            }
            Value::Array(items) => {
                let mut lines = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(line) => lines.push(line),
                        _ => return FieldValue::Unsupported("list containing non-strings"),
                    }
                }
                FieldValue::TextList(lines)
            }
            Value::Bool(_) => FieldValue::Unsupported("boolean"),
            Value::Null => FieldValue::Unsupported("null"),
            Value::Object(_) => FieldValue::Unsupported("object"),
        }
    }
}

/// Key-value record parsed from the model reply, prior to validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    fields: HashMap<String, FieldValue>,
}

impl CandidateRecord {
    /// Build a record from parsed JSON; only objects are accepted
    pub fn from_json(value: Value) -> Result<Self, RecipeError> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from_json(value)))
                .collect()),
            other => {
                let found = FieldValue::from_json(other).kind();
                Err(RecipeError::SchemaValidation(SchemaViolations::new(vec![
                    FieldViolation::new(
                        "(root)",
                        FieldProblem::WrongType {
                            expected: "object",
                            found,
                        },
                    ),
                ])))
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Remove and return a field
    pub fn take(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for CandidateRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        CandidateRecord {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE_JSON: &str = r#"{"name":"Tomato Soup","ingredients":["2 tomatoes"],"steps":["Boil tomatoes."],"prep_time_minutes":10,"calories":80}"#;

    #[test]
    fn test_fenced_block_with_json_tag() {
        let text = format!("Here you go:\n```json\n{}\n```", RECIPE_JSON);
        let (path, candidate) = locate_json(&text);
        assert_eq!(path, ExtractionPath::FencedBlock);
        assert_eq!(candidate, RECIPE_JSON);
    }

    #[test]
    fn test_fenced_block_without_tag() {
        let text = format!("```\n  {}  \n```\nHope you like it", RECIPE_JSON);
        let (path, candidate) = locate_json(&text);
        assert_eq!(path, ExtractionPath::FencedBlock);
        assert_eq!(candidate, RECIPE_JSON);
    }

    #[test]
    fn test_brace_span_with_surrounding_prose() {
        let text = format!("Sure! {} Enjoy!", RECIPE_JSON);
        let (path, candidate) = locate_json(&text);
        assert_eq!(path, ExtractionPath::BraceSpan);
        assert_eq!(candidate, RECIPE_JSON);
    }

    #[test]
    fn test_fence_with_other_language_falls_to_brace_span() {
        let text = format!("```python\n{}\n```", RECIPE_JSON);
        let (path, candidate) = locate_json(&text);
        assert_eq!(path, ExtractionPath::BraceSpan);
        assert_eq!(candidate, RECIPE_JSON);
    }

    #[test]
    fn test_whole_text_when_no_braces() {
        let (path, candidate) = locate_json("  [1, 2, 3]\n");
        assert_eq!(path, ExtractionPath::WholeText);
        assert_eq!(candidate, "[1, 2, 3]");
    }

    #[test]
    fn test_reversed_braces_use_whole_text() {
        let (path, candidate) = locate_json("} nothing here {");
        assert_eq!(path, ExtractionPath::WholeText);
        assert_eq!(candidate, "} nothing here {");
    }

    #[test]
    fn test_plain_prose_is_malformed() {
        let result = extract_candidate("I cannot help with that.");
        assert!(matches!(result, Err(RecipeError::MalformedOutput(_))));
    }

    #[test]
    fn test_invalid_fenced_json_does_not_fall_through() {
        // The fenced block is chosen even though its body is broken; the valid
        // object after it is never considered.
        let text = format!("```json\n{{\"name\": }}\n```\n{}", RECIPE_JSON);
        let (path, _) = locate_json(&text);
        assert_eq!(path, ExtractionPath::FencedBlock);

        let result = extract_candidate(&text);
        assert!(matches!(result, Err(RecipeError::MalformedOutput(_))));
    }

    #[test]
    fn test_non_object_json_is_rejected_at_root() {
        match extract_candidate("[\"2 eggs\"]") {
            Err(RecipeError::SchemaValidation(violations)) => {
                assert_eq!(violations.fields(), vec!["(root)"]);
            }
            other => panic!("Expected root schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_field_values_are_classified() {
        let record = extract_candidate(
            r#"{"a": "text", "b": 7, "c": ["x", "y"], "d": 7.0, "e": 7.5,
                "f": true, "g": null, "h": {"k": 1}, "i": ["x", 1], "j": []}"#,
        )
        .unwrap();

        assert_eq!(record.len(), 10);
        assert_eq!(record.get("a"), Some(&FieldValue::Text("text".to_string())));
        assert_eq!(record.get("b"), Some(&FieldValue::Integer(7)));
        assert_eq!(
            record.get("c"),
            Some(&FieldValue::TextList(vec!["x".to_string(), "y".to_string()]))
        );
        assert_eq!(record.get("d"), Some(&FieldValue::Integer(7)));
        assert_eq!(record.get("e").map(FieldValue::kind), Some("non-integer number"));
        assert_eq!(record.get("f").map(FieldValue::kind), Some("boolean"));
        assert_eq!(record.get("g").map(FieldValue::kind), Some("null"));
        assert_eq!(record.get("h").map(FieldValue::kind), Some("object"));
        assert_eq!(
            record.get("i").map(FieldValue::kind),
            Some("list containing non-strings")
        );
        assert_eq!(record.get("j"), Some(&FieldValue::TextList(vec![])));
    }

    #[test]
    fn test_take_removes_field() {
        let mut record = extract_candidate(RECIPE_JSON).unwrap();
        assert_eq!(
            record.take("name"),
            Some(FieldValue::Text("Tomato Soup".to_string()))
        );
        assert!(record.get("name").is_none());
        assert_eq!(record.len(), 4);
    }
}
