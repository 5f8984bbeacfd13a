// HTTP client for the classification service
//
// Builds the outbound multipart request and interprets the response. The
// request carries exactly one field per submission: `email_text` for typed
// content or `file` for a staged upload - never both.
//
// No total-request timeout is configured and there is no cancellation: a
// submission runs to completion (success, service error, or transport
// failure) before the UI's in-flight guard is released.

use crate::events::Classification;
use crate::validate::SelectedFile;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use thiserror::Error;

/// Fallback message when the service gives us nothing better to show.
pub const GENERIC_SUBMIT_ERROR: &str = "Could not process your request. Please try again.";

/// Why a submission failed.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The service answered non-2xx; carries the body's `error` message,
    /// or the generic fallback when the body had none.
    #[error("{0}")]
    Service(String),

    /// The request never completed - connection refused, DNS failure,
    /// broken stream.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The service answered 2xx but the body did not parse as a
    /// classification result.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ClassifyError {
    /// The message to surface to the user.
    ///
    /// Service messages are shown as-is; transport and parse failures get
    /// the generic fallback (the detail goes to the log, not the notice).
    pub fn user_message(&self) -> String {
        match self {
            ClassifyError::Service(message) => message.clone(),
            ClassifyError::Transport(_) | ClassifyError::Malformed(_) => {
                GENERIC_SUBMIT_ERROR.to_string()
            }
        }
    }
}

/// A submission payload: exactly one of the two input modes.
///
/// Constructed transiently per submission, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationRequest {
    /// Trimmed, non-empty typed text.
    Text(String),
    /// A staged file that already passed validation.
    File(SelectedFile),
}

impl ClassificationRequest {
    /// Short description for the submission log line.
    pub fn describe(&self) -> String {
        match self {
            ClassificationRequest::Text(text) => format!("typed text ({} chars)", text.len()),
            ClassificationRequest::File(file) => {
                format!("file {} ({} bytes)", file.name, file.size_bytes)
            }
        }
    }
}

/// Client for the remote classification service.
///
/// Cheap to clone; each submission task takes its own copy.
#[derive(Debug, Clone)]
pub struct ClassifyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ClassifyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            // Default client: no total-request timeout, matching the
            // submission lifecycle contract. Any deadline comes from the
            // transport or the service itself.
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit one classification request and wait for the outcome.
    pub async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<Classification, ClassifyError> {
        let form = build_form(request).await?;

        let response = self
            .http
            .post(format!("{}/classify", self.endpoint))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            // A 2xx response that isn't JSON is a transport-class failure;
            // a non-2xx body that isn't JSON just loses its message and
            // falls back to the generic one below.
            Err(e) if status.is_success() => return Err(ClassifyError::Transport(e)),
            Err(_) => serde_json::Value::Null,
        };

        parse_response(status, body)
    }

    /// One-shot reachability probe against the service's health endpoint.
    ///
    /// Log-only at startup; the service may well come up later, so a
    /// failure here never gates submission.
    pub async fn health(&self) -> Result<(), ClassifyError> {
        self.http
            .get(format!("{}/health", self.endpoint))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Build the multipart form: exactly one field, keyed by input mode.
async fn build_form(request: ClassificationRequest) -> Result<Form, ClassifyError> {
    match request {
        ClassificationRequest::Text(text) => Ok(Form::new().text("email_text", text)),
        ClassificationRequest::File(file) => {
            // Bytes are read only now, at submission time; the staged
            // record never owns them.
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|e| ClassifyError::Service(format!("Could not read {}: {}", file.name, e)))?;

            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(file.mime)?;

            Ok(Form::new().part("file", part))
        }
    }
}

/// Interpret a response: status plus parsed JSON body.
///
/// Pure so the success/error/fallback paths are testable without a live
/// service.
fn parse_response(
    status: StatusCode,
    body: serde_json::Value,
) -> Result<Classification, ClassifyError> {
    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_SUBMIT_ERROR.to_string());
        return Err(ClassifyError::Service(message));
    }

    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Category;
    use serde_json::json;

    fn success_body() -> serde_json::Value {
        json!({
            "success": true,
            "email_preview": "Status da requisição #2845",
            "category": "Produtivo",
            "confidence": 87,
            "suggested_response": "Prezado(a), ...",
            "timestamp": "2025-01-15 14:02:11"
        })
    }

    #[test]
    fn test_parse_success_response() {
        let result = parse_response(StatusCode::OK, success_body()).unwrap();
        assert_eq!(result.category, Category::Productive);
        assert_eq!(result.confidence, 87);
    }

    #[test]
    fn test_parse_error_uses_service_message() {
        let err = parse_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"success": false, "error": "internal failure"}),
        )
        .unwrap_err();

        assert!(matches!(err, ClassifyError::Service(ref m) if m == "internal failure"));
        assert_eq!(err.user_message(), "internal failure");
    }

    #[test]
    fn test_parse_error_without_message_falls_back() {
        let err = parse_response(StatusCode::BAD_GATEWAY, json!({"status": "down"})).unwrap_err();
        assert_eq!(err.user_message(), GENERIC_SUBMIT_ERROR);

        // Non-JSON error bodies arrive here as Null
        let err = parse_response(StatusCode::INTERNAL_SERVER_ERROR, serde_json::Value::Null)
            .unwrap_err();
        assert_eq!(err.user_message(), GENERIC_SUBMIT_ERROR);
    }

    #[test]
    fn test_parse_malformed_success_body_is_generic() {
        let err = parse_response(StatusCode::OK, json!({"unexpected": true})).unwrap_err();
        assert!(matches!(err, ClassifyError::Malformed(_)));
        assert_eq!(err.user_message(), GENERIC_SUBMIT_ERROR);
    }

    #[test]
    fn test_endpoint_trailing_slash_is_normalized() {
        let client = ClassifyClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.endpoint, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_request_describe() {
        let request = ClassificationRequest::Text("hello".to_string());
        assert_eq!(request.describe(), "typed text (5 chars)");
    }
}
