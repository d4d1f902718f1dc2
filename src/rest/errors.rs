//! Error type for resource operations.
//!
//! [`ResourceError`] flattens call execution errors so that callers can tell
//! bad input, server rejections, and network failures apart with a single
//! `match`.
//!
//! # Example
//!
//! ```rust,ignore
//! use billing_api::{Plan, ResourceError};
//!
//! match Plan::get(&executor, "P-5ML4271244454362WXNWU5NQ", Some(&context)).await {
//!     Ok(plan) => println!("Found: {:?}", plan.name()),
//!     Err(ResourceError::InvalidArgument(e)) => println!("Bad input: {e}"),
//!     Err(e) if e.is_not_found() => println!("No such plan"),
//!     Err(ResourceError::Remote(e)) => println!("Rejected ({}): {:?}", e.code, e.name()),
//!     Err(ResourceError::Transport(e)) => println!("Network failed: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, InvalidHttpRequestError, RemoteApiError, TransportError};
use crate::error::ConfigError;
use crate::model::{MalformedPayloadError, PatchError};
use crate::validation::InvalidArgumentError;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A required argument was missing or empty. Nothing was sent.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// A payload could not be encoded or a response could not be decoded.
    #[error(transparent)]
    MalformedPayload(#[from] MalformedPayloadError),

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),

    /// The network exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No usable API context. Nothing was sent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request was structurally invalid. Nothing was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A patch document is malformed. Nothing was sent.
    #[error(transparent)]
    Patch(#[from] PatchError),
}

impl From<HttpError> for ResourceError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Response(e) => Self::Remote(e),
            HttpError::InvalidRequest(e) => Self::InvalidRequest(e),
            HttpError::Transport(e) => Self::Transport(e),
            HttpError::Context(e) => Self::Config(e),
        }
    }
}

impl ResourceError {
    /// Returns the HTTP status of a remote error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns the `PayPal-Debug-Id` of a remote error, if present.
    ///
    /// Useful for debugging and error reporting.
    #[must_use]
    pub fn debug_id(&self) -> Option<&str> {
        match self {
            Self::Remote(e) => e.debug_id.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` for a remote 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Returns `true` if the error was raised before any network I/O.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::Config(_) | Self::InvalidRequest(_) | Self::Patch(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remote(code: u16) -> RemoteApiError {
        RemoteApiError {
            code,
            body: json!({"name": "RESOURCE_NOT_FOUND"}),
            debug_id: Some("dbg-1".to_string()),
        }
    }

    #[test]
    fn test_http_error_is_flattened() {
        let error: ResourceError = HttpError::Response(remote(404)).into();
        assert!(matches!(error, ResourceError::Remote(_)));
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.debug_id(), Some("dbg-1"));
        assert!(error.is_not_found());

        let error: ResourceError = HttpError::Transport(TransportError::new("timed out")).into();
        assert!(matches!(error, ResourceError::Transport(_)));
        assert!(error.status().is_none());

        let error: ResourceError = HttpError::Context(ConfigError::MissingApiContext).into();
        assert!(matches!(error, ResourceError::Config(_)));
        assert!(error.is_client_side());
    }

    #[test]
    fn test_not_found_only_for_404() {
        let error = ResourceError::Remote(remote(409));
        assert!(!error.is_not_found());
        assert!(!error.is_client_side());
    }

    #[test]
    fn test_invalid_argument_message() {
        let error: ResourceError = InvalidArgumentError { name: "id" }.into();
        assert_eq!(error.to_string(), "id cannot be null or empty");
        assert!(error.is_client_side());
        assert!(error.debug_id().is_none());
    }
}
