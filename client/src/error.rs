//! Gateway error handling
//!
//! Non-success responses become typed errors carrying the message the
//! backend sent, classified the same way the notifications are.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message used when an error body is JSON but carries no message
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Failure raised by a backend call
#[derive(Error, Debug)]
pub enum GatewayError {
    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 400
    #[error("{0}")]
    InvalidRequest(String),

    /// 500
    #[error("{0}")]
    Server(String),

    /// Any other non-2xx status
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success body that does not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Error categories, one per notification style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidRequest,
    Server,
    RequestFailed,
    Network,
    Unexpected,
}

impl GatewayError {
    /// Classify a non-success status
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => GatewayError::NotFound(message),
            StatusCode::BAD_REQUEST => GatewayError::InvalidRequest(message),
            StatusCode::INTERNAL_SERVER_ERROR => GatewayError::Server(message),
            other => GatewayError::RequestFailed {
                status: other.as_u16(),
                message,
            },
        }
    }

    pub(crate) fn missing_body() -> Self {
        GatewayError::Decode("expected a JSON body, got an empty response".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            GatewayError::Server(_) => ErrorKind::Server,
            GatewayError::RequestFailed { .. } => ErrorKind::RequestFailed,
            GatewayError::Network(_) => ErrorKind::Network,
            GatewayError::Decode(_)
            | GatewayError::Encode(_)
            | GatewayError::InvalidBaseUrl { .. } => ErrorKind::Unexpected,
        }
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::NotFound(_) => Some(404),
            GatewayError::InvalidRequest(_) => Some(400),
            GatewayError::Server(_) => Some(500),
            GatewayError::RequestFailed { status, .. } => Some(*status),
            GatewayError::Network(_)
            | GatewayError::Decode(_)
            | GatewayError::Encode(_)
            | GatewayError::InvalidBaseUrl { .. } => None,
        }
    }

    /// The extracted message (the backend's own text for HTTP failures)
    pub fn message(&self) -> String {
        match self {
            GatewayError::NotFound(message)
            | GatewayError::InvalidRequest(message)
            | GatewayError::Server(message)
            | GatewayError::RequestFailed { message, .. }
            | GatewayError::Decode(message) => message.clone(),
            GatewayError::Network(err) => err.to_string(),
            GatewayError::Encode(err) => err.to_string(),
            GatewayError::InvalidBaseUrl { .. } => self.to_string(),
        }
    }
}

/// Pull a human-readable message out of an error response body
///
/// JSON bodies yield `message`, then `error` (a string, or an object with its
/// own `message`), then [`DEFAULT_ERROR_MESSAGE`]. Anything else falls back to
/// the status reason phrase, or `HTTP {status}`. Never fails.
pub fn extract_error_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => message_field(&value).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        Err(_) => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
    }
}

fn message_field(value: &Value) -> Option<String> {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    non_empty(value.get("message"))
        .or_else(|| non_empty(value.get("error")))
        .or_else(|| non_empty(value.get("error").and_then(|e| e.get("message"))))
}

/// Result type alias for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;
