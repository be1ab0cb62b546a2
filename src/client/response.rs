//! Response decoding shared by every service call. Error bodies are reduced to
//! a short user-facing message: the server's `message` field when present,
//! otherwise the trimmed body, otherwise a generic fallback.

use super::errors::ApiError;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maximum number of error body characters surfaced to the caller.
const MAX_ERROR_CHARS: usize = 200;
const FALLBACK_MESSAGE: &str = "Request failed.";

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
pub(crate) async fn handle_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ApiError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

/// Handles responses whose body is irrelevant.
pub(crate) async fn handle_empty_response(response: Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

/// Reads a plain value; a JSON string body is unwrapped.
pub(crate) async fn handle_text_response(response: Response) -> Result<String, ApiError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|err| ApiError::Decode(format!("Failed to read response: {err}")))?;

    Ok(match serde_json::from_str::<Value>(&body) {
        Ok(Value::String(value)) => value,
        _ => body.trim().to_string(),
    })
}

pub(crate) async fn error_from_response(response: Response) -> ApiError {
    let (status, message) = status_and_message(response).await;
    ApiError::Http { status, message }
}

pub(crate) async fn status_and_message(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    (status, server_message(&body))
}

/// Extracts the user-facing message from an error body.
pub(crate) fn server_message(body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        let message = ["message", "error", "detail"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|message| !message.is_empty());

        if let Some(message) = message {
            return truncate(message);
        }
    }

    sanitize_body(body)
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        truncate(trimmed)
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_message_field() {
        assert_eq!(
            server_message(r#"{"message":" Username already exists ","status":409}"#),
            "Username already exists"
        );
        assert_eq!(server_message(r#"{"error":"Forbidden"}"#), "Forbidden");
    }

    #[test]
    fn server_message_falls_back_to_body() {
        assert_eq!(server_message("  Bad gateway  "), "Bad gateway");
        assert_eq!(server_message(""), FALLBACK_MESSAGE);
        assert_eq!(server_message(r#"{"message":""}"#), r#"{"message":""}"#);
    }

    #[test]
    fn server_message_is_truncated() {
        let long = "x".repeat(MAX_ERROR_CHARS * 2);
        assert_eq!(server_message(&long).chars().count(), MAX_ERROR_CHARS);
    }
}
