//! Process-wide default API context.
//!
//! Calls normally receive their [`ApiContext`] explicitly. When they are
//! given `None`, they fall back to a single default context that must be
//! installed once with [`init_default_context`]. The default is never
//! created implicitly.

use std::sync::OnceLock;

use crate::config::ApiContext;
use crate::error::ConfigError;

static DEFAULT_CONTEXT: OnceLock<ApiContext> = OnceLock::new();

/// Installs the process-wide default context.
///
/// Initialization happens at most once, even when several threads race to
/// install a default. Only the first caller succeeds.
///
/// # Errors
///
/// Returns [`ConfigError::DefaultContextAlreadyInitialized`] if a default
/// context has already been installed.
///
/// # Example
///
/// ```rust
/// use billing_api::{default_context, init_default_context, AccessToken, ApiContext};
///
/// let context = ApiContext::builder()
///     .access_token(AccessToken::new("token").unwrap())
///     .build()
///     .unwrap();
///
/// init_default_context(context).unwrap();
/// assert!(default_context().is_some());
/// ```
pub fn init_default_context(context: ApiContext) -> Result<(), ConfigError> {
    DEFAULT_CONTEXT
        .set(context)
        .map_err(|_| ConfigError::DefaultContextAlreadyInitialized)?;
    tracing::info!("Default API context initialized");
    Ok(())
}

/// Returns the process-wide default context, if one has been installed.
#[must_use]
pub fn default_context() -> Option<&'static ApiContext> {
    DEFAULT_CONTEXT.get()
}

/// Picks the context a call should use.
///
/// An explicit context always wins; otherwise `fallback` is used.
///
/// # Errors
///
/// Returns [`ConfigError::MissingApiContext`] when neither is available.
pub fn resolve_context<'a>(
    explicit: Option<&'a ApiContext>,
    fallback: Option<&'a ApiContext>,
) -> Result<&'a ApiContext, ConfigError> {
    explicit.or(fallback).ok_or(ConfigError::MissingApiContext)
}
