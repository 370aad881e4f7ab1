//! Request and response handling shared by the OpenAI-compatible chat
//! completions endpoints (OpenAI itself and Ollama's `/v1` API).

use std::time::Duration;

use log::debug;
use reqwest::{Client, Response};
use serde_json::{json, Value};

use super::ProviderError;

pub(crate) fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

pub(crate) fn completion_body(
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
    max_tokens: u32,
) -> Value {
    json!({
        "model": model,
        "messages": [
            {"role": "system", "content": system},
            {"role": "user", "content": user}
        ],
        "temperature": temperature,
        "max_tokens": max_tokens
    })
}

/// Read the completion text out of a chat completions response
pub(crate) async fn read_completion(
    provider: &str,
    response: Response,
) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    debug!("{} response ({}): {}", provider, status, body);

    let parsed: Option<Value> = serde_json::from_str(&body).ok();

    if !status.is_success() {
        let detail = parsed
            .as_ref()
            .and_then(api_error_message)
            .unwrap_or_else(|| body.trim().to_string());
        return Err(ProviderError::Api {
            status: Some(status.as_u16()),
            message: format!("{} API error ({}): {}", provider, status, detail),
        });
    }

    let response_body = parsed.ok_or_else(|| {
        ProviderError::EmptyResponse(format!("{} returned a body that is not JSON", provider))
    })?;

    // Some servers report errors with a 200 status
    if let Some(detail) = api_error_message(&response_body) {
        return Err(ProviderError::Api {
            status: None,
            message: format!("{} API error: {}", provider, detail),
        });
    }

    response_body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::EmptyResponse(format!(
                "Failed to extract content from {} response. Response: {}",
                provider,
                serde_json::to_string_pretty(&response_body)
                    .unwrap_or_else(|_| response_body.to_string())
            ))
        })
}

/// `error` may be a bare string or `{"message": ..., "code": ...}`
fn api_error_message(body: &Value) -> Option<String> {
    let error = body.get("error").filter(|e| !e.is_null())?;
    if let Some(message) = error.as_str() {
        return Some(message.to_string());
    }

    let message = error["message"].as_str().unwrap_or("Unknown error");
    match error["code"].as_str() {
        Some(code) => Some(format!("{} (code: {})", message, code)),
        None => Some(message.to_string()),
    }
}
