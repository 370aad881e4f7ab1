use std::error::Error;

use thiserror::Error;

use crate::error::RecipeError;

/// Failure reported by a backend client
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure: connection refused, timeout, undecodable body
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The backend answered with an error status or an `error` payload
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The backend answered without any completion text
    #[error("{0}")]
    EmptyResponse(String),
}

/// Case-insensitive substrings that identify a rejected credential in a
/// backend error message.
///
/// | marker               | seen in                                                |
/// |----------------------|--------------------------------------------------------|
/// | `401`                | status codes echoed into messages by HTTP clients      |
/// | `invalid_api_key`    | OpenAI `error.code` for unknown or revoked keys        |
/// | `incorrect api key`  | OpenAI `error.message` ("Incorrect API key provided")  |
///
/// Update this table when a backend changes its wording; call sites only use
/// [`classify_provider_error`] and [`classify_backend_message`].
pub const AUTH_FAILURE_MARKERS: &[&str] = &["401", "invalid_api_key", "incorrect api key"];

/// True when `message` mentions any of the [`AUTH_FAILURE_MARKERS`].
pub fn is_auth_failure(message: &str) -> bool {
    let message = message.to_lowercase();
    AUTH_FAILURE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Map an opaque backend error message onto the caller-facing taxonomy.
pub fn classify_backend_message(message: &str) -> RecipeError {
    if is_auth_failure(message) {
        RecipeError::AuthenticationFailed(message.to_string())
    } else {
        RecipeError::GenerationFailed(message.to_string())
    }
}

/// Map a backend client failure onto the caller-facing taxonomy.
///
/// A structured HTTP 401 wins; otherwise the full error text (including its
/// source chain) is matched against [`AUTH_FAILURE_MARKERS`]. Everything else
/// becomes [`RecipeError::GenerationFailed`].
pub fn classify_provider_error(error: ProviderError) -> RecipeError {
    if let ProviderError::Api {
        status: Some(401),
        message,
    } = &error
    {
        return RecipeError::AuthenticationFailed(message.clone());
    }

    classify_backend_message(&error_chain(&error))
}

impl From<ProviderError> for RecipeError {
    fn from(error: ProviderError) -> Self {
        classify_provider_error(error)
    }
}

/// Join an error and all of its sources into one message
fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
