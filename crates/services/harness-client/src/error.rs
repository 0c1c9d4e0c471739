use crate::status::{HttpKind, classify_status};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when using the Harness client
#[derive(Debug, Error)]
pub enum HarnessError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// API error returned by a Harness service
    #[error("API error ({}): {}", .0.status_code.unwrap_or_default(), .0.message)]
    Api(ApiErrorObject),

    /// A response arrived with a status the caller does not accept
    #[error("unexpected status code {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
    },

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Error body returned by Harness services
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorObject {
    /// HTTP status code (filled in from the response, not the body)
    #[serde(default, skip_serializing)]
    pub status_code: Option<u16>,
    /// Envelope status, usually `ERROR` or `FAILURE`
    #[serde(default)]
    pub status: Option<String>,
    /// Harness error code, e.g. `INVALID_REQUEST`
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// Request correlation id for support tickets
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl HarnessError {
    /// Determines if this error is retryable
    ///
    /// Retryable errors include rate limits (429), timeouts (408),
    /// and server errors (5xx).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(obj) => obj
                .status_code
                .is_some_and(crate::retry::is_retryable_status),
            Self::Reqwest(e) => e.is_timeout() || e.is_connect(),
            Self::UnexpectedStatus { .. } | Self::Config(_) | Self::Serde(_) => false,
        }
    }

    /// HTTP status code, when the error came from a response
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => obj.status_code,
            Self::UnexpectedStatus { status } => Some(*status),
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::Serde(_) => None,
        }
    }

    /// Classify the error for mapping onto caller-facing error kinds
    #[must_use]
    pub fn kind(&self) -> HttpKind {
        match self {
            Self::Reqwest(e) => crate::status::classify_reqwest_error(e),
            _ => self
                .status_code()
                .and_then(|c| StatusCode::from_u16(c).ok())
                .map_or(HttpKind::Unknown, classify_status),
        }
    }
}

/// Maps a serde deserialization error to a `HarnessError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> HarnessError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    HarnessError::Serde(format!("{e}: {snippet}"))
}

/// Deserializes an API error from the response body
///
/// Attempts to parse the error as JSON, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> HarnessError {
    let status_code = Some(status.as_u16());

    if let Ok(mut obj) = serde_json::from_slice::<ApiErrorObject>(body) {
        obj.status_code = status_code;
        return HarnessError::Api(obj);
    }

    // Gateways return HTML or plain text on 5xx; cap body to avoid log/memory bloat
    HarnessError::Api(ApiErrorObject {
        status_code,
        code: Some(format!("http_{}", status.as_u16())),
        message: String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned(),
        ..ApiErrorObject::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_parses_harness_body() {
        let body = br#"{"status":"ERROR","code":"RESOURCE_NOT_FOUND","message":"Pipeline not found","correlationId":"c-1"}"#;
        let err = deserialize_api_error(StatusCode::NOT_FOUND, body);
        let HarnessError::Api(obj) = &err else {
            panic!("expected Api error, got {err:?}");
        };
        assert_eq!(obj.status_code, Some(404));
        assert_eq!(obj.code.as_deref(), Some("RESOURCE_NOT_FOUND"));
        assert_eq!(obj.correlation_id.as_deref(), Some("c-1"));
        assert_eq!(err.kind(), HttpKind::NotFound);
        assert!(err.to_string().contains("Pipeline not found"));
    }

    #[test]
    fn api_error_falls_back_to_text() {
        let err = deserialize_api_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        let HarnessError::Api(obj) = &err else {
            panic!("expected Api error, got {err:?}");
        };
        assert_eq!(obj.code.as_deref(), Some("http_502"));
        assert!(err.is_retryable());
    }

    #[test]
    fn unexpected_status_is_not_retryable() {
        let err = HarnessError::UnexpectedStatus { status: 204 };
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), Some(204));
        assert_eq!(err.to_string(), "unexpected status code 204");
    }
}
