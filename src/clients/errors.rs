//! HTTP-specific error types for the billing API client.
//!
//! This module contains error types for call execution: remote API errors,
//! transport failures, and request validation failures.
//!
//! # Error Handling
//!
//! - [`RemoteApiError`]: Non-2xx HTTP responses from the API
//! - [`TransportError`]: The network exchange itself failed
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type returned by the
//!   [`CallExecutor`](crate::clients::CallExecutor)
//!
//! # Example
//!
//! ```rust,ignore
//! use billing_api::clients::{CallExecutor, HttpError, HttpMethod, HttpRequest};
//!
//! match executor.execute(request, Some(&context)).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {:?}", e.code, e.name());
//!     }
//!     Err(HttpError::Transport(e)) => println!("Network error: {e}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Context(e)) => println!("Configuration error: {e}"),
//! }
//! ```

use std::error::Error as StdError;

use serde_json::Value;
use thiserror::Error;

use crate::error::ConfigError;

/// Error returned when a call receives a non-successful response.
///
/// The body holds the parsed JSON error document when the response body is
/// valid JSON, the raw text as a JSON string when it is not, and `null`
/// when the response had no body.
///
/// # Example
///
/// ```rust
/// use billing_api::clients::RemoteApiError;
/// use serde_json::json;
///
/// let error = RemoteApiError {
///     code: 404,
///     body: json!({"name": "RESOURCE_NOT_FOUND", "message": "The specified resource does not exist."}),
///     debug_id: Some("f2a4b3c1d0e9".to_string()),
/// };
///
/// assert_eq!(error.name(), Some("RESOURCE_NOT_FOUND"));
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Remote API error {code}: {}", summary(.body))]
pub struct RemoteApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error body: parsed JSON, or the raw text as a string.
    pub body: Value,
    /// Correlation ID from the `PayPal-Debug-Id` header.
    pub debug_id: Option<String>,
}

impl RemoteApiError {
    /// Returns the error `name` field of the body, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.body.get("name").and_then(Value::as_str)
    }

    /// Returns the error `message` field of the body, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Returns the `details` array of the body, if present.
    #[must_use]
    pub fn details(&self) -> Option<&[Value]> {
        self.body
            .get("details")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

fn summary(body: &Value) -> String {
    match body {
        Value::Null => "<empty body>".to_string(),
        Value::String(raw) => raw.clone(),
        Value::Object(_) => match (
            body.get("name").and_then(Value::as_str),
            body.get("message").and_then(Value::as_str),
        ) {
            (Some(name), Some(message)) => format!("{name}: {message}"),
            (Some(name), None) => name.to_string(),
            _ => body.to_string(),
        },
        other => other.to_string(),
    }
}

/// Error returned when the network exchange fails.
///
/// Covers connection failures, timeouts, and unreadable responses. It is
/// distinct from an HTTP error status, which is a [`RemoteApiError`].
#[derive(Debug, Error)]
#[error("Transport error: {message}")]
pub struct TransportError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Whether the failure was a timeout.
    pub timeout: bool,
    /// The underlying error, if any.
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timeout: false,
            source: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            message: error.to_string(),
            timeout: error.is_timeout(),
            source: Some(Box::new(error)),
        }
    }
}

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use billing_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is not absolute.
    #[error("Request path '{path}' must start with '/'.")]
    RelativePath {
        /// The rejected path.
        path: String,
    },
}

/// Unified error type for call execution.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response.
    #[error(transparent)]
    Response(#[from] RemoteApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No usable API context.
    #[error(transparent)]
    Context(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_error_message_uses_name_and_message() {
        let error = RemoteApiError {
            code: 422,
            body: json!({"name": "UNPROCESSABLE_ENTITY", "message": "The requested action could not be performed."}),
            debug_id: None,
        };
        assert_eq!(
            error.to_string(),
            "Remote API error 422: UNPROCESSABLE_ENTITY: The requested action could not be performed."
        );
    }

    #[test]
    fn test_remote_error_with_raw_body() {
        let error = RemoteApiError {
            code: 502,
            body: Value::String("<html>Bad Gateway</html>".to_string()),
            debug_id: None,
        };
        assert!(error.to_string().contains("Bad Gateway"));
        assert!(error.name().is_none());
    }

    #[test]
    fn test_remote_error_with_empty_body() {
        let error = RemoteApiError {
            code: 500,
            body: Value::Null,
            debug_id: Some("abc".to_string()),
        };
        assert_eq!(error.to_string(), "Remote API error 500: <empty body>");
    }

    #[test]
    fn test_remote_error_details() {
        let error = RemoteApiError {
            code: 400,
            body: json!({
                "name": "INVALID_REQUEST",
                "details": [{"field": "/name", "issue": "MISSING_REQUIRED_PARAMETER"}]
            }),
            debug_id: None,
        };
        assert_eq!(error.details().map(<[Value]>::len), Some(1));
        assert!(error.message().is_none());
    }

    #[test]
    fn test_transport_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = TransportError {
            message: "connection refused".to_string(),
            timeout: false,
            source: Some(Box::new(io)),
        };
        assert!(error.source().is_some());
        assert_eq!(error.to_string(), "Transport error: connection refused");
        assert!(TransportError::new("x").source().is_none());
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "PATCH".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot use PATCH without specifying data."
        );
    }

    #[test]
    fn test_http_error_is_transparent() {
        let error: HttpError = ConfigError::MissingApiContext.into();
        assert_eq!(
            error.to_string(),
            ConfigError::MissingApiContext.to_string()
        );
    }
}
