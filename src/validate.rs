use std::ops::RangeInclusive;

use log::debug;

use crate::error::{FieldProblem, FieldViolation, RecipeError, SchemaViolations};
use crate::extract::{CandidateRecord, FieldValue};
use crate::model::{Recipe, CALORIES_RANGE, PREP_TIME_RANGE};

/// Turn a candidate record into a [`Recipe`].
///
/// Every required field is checked and all failures are reported together;
/// a single failure rejects the whole record. Values are never clamped or
/// coerced, and keys outside the schema are ignored.
pub fn validate(record: CandidateRecord) -> Result<Recipe, RecipeError> {
    let mut check = FieldCheck {
        record,
        violations: Vec::new(),
    };

    let name = check.text("name");
    let ingredients = check.text_list("ingredients");
    let steps = check.text_list("steps");
    let prep_time_minutes = check.integer_in("prep_time_minutes", PREP_TIME_RANGE);
    let calories = check.integer_in("calories", CALORIES_RANGE);

    if !check.record.is_empty() {
        debug!("Ignoring {} field(s) outside the recipe schema", check.record.len());
    }

    match (name, ingredients, steps, prep_time_minutes, calories) {
        (Some(name), Some(ingredients), Some(steps), Some(prep_time_minutes), Some(calories))
            if check.violations.is_empty() =>
        {
            Ok(Recipe::new(
                name,
                ingredients,
                steps,
                prep_time_minutes,
                calories,
            ))
        }
        _ => Err(RecipeError::SchemaValidation(SchemaViolations::new(
            check.violations,
        ))),
    }
}

struct FieldCheck {
    record: CandidateRecord,
    violations: Vec<FieldViolation>,
}

impl FieldCheck {
    fn reject(&mut self, field: &str, problem: FieldProblem) {
        self.violations.push(FieldViolation::new(field, problem));
    }

    fn wrong_type(&mut self, field: &str, expected: &'static str, found: &FieldValue) {
        self.reject(
            field,
            FieldProblem::WrongType {
                expected,
                found: found.kind(),
            },
        );
    }

    /// Non-blank string
    fn text(&mut self, field: &str) -> Option<String> {
        match self.record.take(field) {
            Some(FieldValue::Text(text)) if text.trim().is_empty() => {
                self.reject(field, FieldProblem::Empty);
                None
            }
            Some(FieldValue::Text(text)) => Some(text),
            Some(other @ (FieldValue::Integer(_)
            | FieldValue::TextList(_)
            | FieldValue::Unsupported(_))) => {
                self.wrong_type(field, "string", &other);
                None
            }
            None => {
                self.reject(field, FieldProblem::Missing);
                None
            }
        }
    }

    fn text_list(&mut self, field: &str) -> Option<Vec<String>> {
        match self.record.take(field) {
            Some(FieldValue::TextList(lines)) => Some(lines),
            Some(other @ (FieldValue::Text(_)
            | FieldValue::Integer(_)
            | FieldValue::Unsupported(_))) => {
                self.wrong_type(field, "list of strings", &other);
                None
            }
            None => {
                self.reject(field, FieldProblem::Missing);
                None
            }
        }
    }

    fn integer_in(&mut self, field: &str, range: RangeInclusive<i64>) -> Option<u32> {
        match self.record.take(field) {
            Some(FieldValue::Integer(value)) => {
                // Both ranges are non-negative and far below u32::MAX
                let accepted = i64::try_from(value)
                    .ok()
                    .filter(|v| range.contains(v))
                    .and_then(|v| u32::try_from(v).ok());
                if accepted.is_none() {
                    self.reject(
                        field,
                        FieldProblem::OutOfRange {
                            value,
                            min: *range.start(),
                            max: *range.end(),
                        },
                    );
                }
                accepted
            }
            Some(other @ (FieldValue::Text(_)
            | FieldValue::TextList(_)
            | FieldValue::Unsupported(_))) => {
                self.wrong_type(field, "integer", &other);
                None
            }
            None => {
                self.reject(field, FieldProblem::Missing);
                None
            }
        }
    }
}
