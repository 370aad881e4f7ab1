use std::fmt;

use thiserror::Error;

/// Errors that can occur while generating a recipe
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The selected backend cannot be used (e.g. no credential configured)
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend rejected the configured credential
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The backend reply did not contain parseable JSON
    #[error("Model did not return valid JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    /// The parsed JSON does not describe a valid recipe
    #[error("Recipe failed validation: {0}")]
    SchemaValidation(SchemaViolations),

    /// Any other backend invocation failure
    #[error("Recipe generation failed: {0}")]
    GenerationFailed(String),

    /// The request itself is unusable (e.g. no ingredients)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to bind or run the HTTP server
    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}

impl RecipeError {
    /// Actionable advice for the person who made the request, if there is any.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            RecipeError::BackendUnavailable(_) => Some(
                "OpenAI mode requires an API key. Set OPENAI_API_KEY and restart, or switch to local (Ollama) mode.",
            ),
            RecipeError::AuthenticationFailed(_) => Some(
                "The OpenAI API key is invalid or expired. Switch to local (Ollama) mode, or set a valid OPENAI_API_KEY.",
            ),
            RecipeError::GenerationFailed(message) => {
                let message = message.to_lowercase();
                if message.contains("connect") || message.contains("refused") {
                    Some("Cannot reach the backend. Check that it is running and that its base_url is correct.")
                } else {
                    None
                }
            }
            RecipeError::MalformedOutput(_) | RecipeError::SchemaValidation(_) => {
                Some("The model returned an unusable recipe. Try again, or try the other mode.")
            }
            RecipeError::InvalidRequest(_) => Some("Enter at least one ingredient, e.g. `egg, onion`."),
            RecipeError::ConfigError(_) | RecipeError::ServerError(_) => None,
        }
    }
}

/// What is wrong with a single recipe field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    OutOfRange {
        value: i128,
        min: i64,
        max: i64,
    },
    Empty,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "field is missing"),
            FieldProblem::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            FieldProblem::OutOfRange { value, min, max } => {
                write!(f, "{} is outside the allowed range {}-{}", value, min, max)
            }
            FieldProblem::Empty => write!(f, "must not be empty"),
        }
    }
}

/// A rejected field together with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub problem: FieldProblem,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, problem: FieldProblem) -> Self {
        FieldViolation {
            field: field.into(),
            problem,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Every field that failed validation, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolations(Vec<FieldViolation>);

impl SchemaViolations {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        SchemaViolations(violations)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the rejected fields
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// The problem reported for `field`, if it was rejected
    pub fn problem(&self, field: &str) -> Option<&FieldProblem> {
        self.0.iter().find(|v| v.field == field).map(|v| &v.problem)
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}
