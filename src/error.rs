//! Error types for API context configuration.
//!
//! This module contains error types used when building an
//! [`ApiContext`](crate::ApiContext) and when resolving which context a call
//! should use.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use billing_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring or resolving an API context.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide a valid REST API client ID.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide a valid REST API client secret.")]
    EmptyClientSecret,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// The `mode` option is not a known environment.
    #[error("Invalid mode '{mode}'. Expected 'sandbox' or 'live'.")]
    InvalidMode {
        /// The mode string that was provided.
        mode: String,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api-m.sandbox.paypal.com').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A configuration option has a value that cannot be used.
    #[error("Invalid value '{value}' for config option '{key}': {reason}")]
    InvalidConfigOption {
        /// The option key.
        key: String,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the API context.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// No context was passed and no process-wide default has been installed.
    #[error("No API context was provided and the default context has not been initialized. Call `init_default_context` first or pass a context explicitly.")]
    MissingApiContext,

    /// The process-wide default context can only be set once.
    #[error("The default API context has already been initialized.")]
    DefaultContextAlreadyInitialized,
}
