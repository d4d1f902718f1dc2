//! API context configuration.
//!
//! This module provides the [`ApiContext`] that every call reads its
//! credentials and per-call configuration from.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiContext`]: Credentials plus configuration options for API calls
//! - [`ApiContextBuilder`]: A builder for constructing [`ApiContext`] instances
//! - [`ClientId`], [`ClientSecret`], [`AccessToken`]: Validated credential newtypes
//! - [`EndpointUrl`]: A validated base URL
//! - [`Environment`]: Sandbox or live deployment
//! - [`init_default_context`] / [`default_context`]: The process-wide fallback context
//!
//! # Configuration Options
//!
//! Options are plain string pairs readable through [`ApiContext::config_option`].
//! The following keys are interpreted and validated when the context is built:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `mode` | `sandbox` (default) or `live` |
//! | `service.EndPoint` | Base URL override |
//! | `http.ConnectionTimeOut` | Transport timeout in whole seconds |
//! | `http.headers.<Name>` | Extra header sent with every call |
//!
//! # Example
//!
//! ```rust
//! use billing_api::{ApiContext, ClientId, ClientSecret, Environment};
//!
//! let context = ApiContext::builder()
//!     .client_credentials(
//!         ClientId::new("my-client-id").unwrap(),
//!         ClientSecret::new("my-secret").unwrap(),
//!     )
//!     .environment(Environment::Live)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(context.config_option("mode"), Some("live"));
//! assert_eq!(context.endpoint().as_ref(), "https://api-m.paypal.com");
//! ```

mod default_context;
mod environment;
mod newtypes;

pub use default_context::{default_context, init_default_context, resolve_context};
pub use environment::{Environment, LIVE_ENDPOINT, SANDBOX_ENDPOINT};
pub use newtypes::{AccessToken, ClientId, ClientSecret, EndpointUrl};

use std::collections::BTreeMap;
use std::time::Duration;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Option key selecting the environment.
pub const MODE_KEY: &str = "mode";
/// Option key overriding the base URL.
pub const ENDPOINT_KEY: &str = "service.EndPoint";
/// Option key holding the transport timeout in seconds.
pub const TIMEOUT_KEY: &str = "http.ConnectionTimeOut";
/// Prefix of option keys that become request headers.
pub const HEADER_KEY_PREFIX: &str = "http.headers.";

/// Credentials and configuration for API calls.
///
/// A context is passed by reference into every operation and is never owned
/// by a resource. When an operation receives `None`, the process-wide
/// default installed with [`init_default_context`] is used instead.
///
/// # Thread Safety
///
/// `ApiContext` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ApiContext {
    credentials: Credentials,
    options: BTreeMap<String, String>,
    environment: Environment,
    endpoint: EndpointUrl,
    timeout: Option<Duration>,
    request_id: Option<String>,
    user_agent_prefix: Option<String>,
}

// Verify ApiContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiContext>();
};

impl ApiContext {
    /// Creates a new builder for constructing an `ApiContext`.
    #[must_use]
    pub fn builder() -> ApiContextBuilder {
        ApiContextBuilder::new()
    }

    /// Returns the credentials used to authorize calls.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the raw value of a configuration option.
    #[must_use]
    pub fn config_option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Returns all configuration options, ordered by key.
    #[must_use]
    pub const fn config_options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Returns the environment selected by the `mode` option.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the effective base URL.
    ///
    /// This is the `service.EndPoint` override when set, otherwise the
    /// environment's default endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the idempotency key sent as `PayPal-Request-Id`, if set.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the extra headers configured through `http.headers.*` options.
    pub fn extra_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().filter_map(|(key, value)| {
            key.strip_prefix(HEADER_KEY_PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| (name, value.as_str()))
        })
    }

    /// Returns a copy of this context with a different request ID.
    ///
    /// Useful for giving each create call its own idempotency key while
    /// sharing the rest of the configuration.
    #[must_use]
    pub fn with_request_id(&self, request_id: impl Into<String>) -> Self {
        let mut context = self.clone();
        context.request_id = Some(request_id.into());
        context
    }
}

/// Builder for constructing [`ApiContext`] instances.
///
/// Credentials are required. All options are validated by [`build`](Self::build).
///
/// # Defaults
///
/// - `mode`: `sandbox`
/// - `service.EndPoint`: the environment's endpoint
/// - timeout: none (transport default)
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use billing_api::{AccessToken, ApiContext, EndpointUrl};
///
/// let context = ApiContext::builder()
///     .access_token(AccessToken::new("token").unwrap())
///     .endpoint(EndpointUrl::new("http://localhost:8080").unwrap())
///     .timeout(Duration::from_secs(30))
///     .header("PayPal-Partner-Attribution-Id", "my-bn-code")
///     .build()
///     .unwrap();
///
/// assert_eq!(context.timeout(), Some(Duration::from_secs(30)));
/// assert_eq!(context.endpoint().as_ref(), "http://localhost:8080");
/// ```
#[derive(Debug, Default)]
pub struct ApiContextBuilder {
    credentials: Option<Credentials>,
    options: BTreeMap<String, String>,
    request_id: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ApiContextBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets client ID and secret credentials.
    #[must_use]
    pub fn client_credentials(self, client_id: ClientId, client_secret: ClientSecret) -> Self {
        self.credentials(Credentials::client_credentials(client_id, client_secret))
    }

    /// Sets a pre-acquired access token as the credentials.
    #[must_use]
    pub fn access_token(self, token: AccessToken) -> Self {
        self.credentials(Credentials::AccessToken(token))
    }

    /// Sets a raw configuration option.
    #[must_use]
    pub fn config_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Sets the environment (`mode` option).
    #[must_use]
    pub fn environment(self, environment: Environment) -> Self {
        self.config_option(MODE_KEY, environment.to_string())
    }

    /// Overrides the base URL (`service.EndPoint` option).
    #[must_use]
    pub fn endpoint(self, endpoint: EndpointUrl) -> Self {
        self.config_option(ENDPOINT_KEY, endpoint.as_ref())
    }

    /// Sets the transport timeout (`http.ConnectionTimeOut` option).
    ///
    /// The option holds whole seconds, so a fractional timeout is rounded
    /// up; `Duration::from_millis(500)` becomes one second. A zero duration
    /// is rejected by [`build`](Self::build).
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        let seconds = timeout
            .as_secs()
            .saturating_add(u64::from(timeout.subsec_nanos() > 0));
        self.config_option(TIMEOUT_KEY, seconds.to_string())
    }

    /// Adds a header sent with every call (`http.headers.<name>` option).
    #[must_use]
    pub fn header(self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        let key = format!("{HEADER_KEY_PREFIX}{}", name.as_ref());
        self.config_option(key, value)
    }

    /// Sets the idempotency key sent as `PayPal-Request-Id`.
    #[must_use]
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiContext`], validating credentials and options.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if no credentials were set
    /// - [`ConfigError::InvalidMode`] if `mode` is not `sandbox` or `live`
    /// - [`ConfigError::InvalidEndpointUrl`] if `service.EndPoint` is not a URL
    /// - [`ConfigError::InvalidConfigOption`] if the timeout is not a positive integer
    pub fn build(self) -> Result<ApiContext, ConfigError> {
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        let environment = self
            .options
            .get(MODE_KEY)
            .map(|mode| mode.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        let endpoint = match self.options.get(ENDPOINT_KEY) {
            Some(url) => {
                let endpoint = EndpointUrl::new(url.as_str())?;
                if endpoint.as_ref() != environment.endpoint() {
                    tracing::debug!(
                        "API context overriding {} endpoint with {}",
                        environment,
                        endpoint
                    );
                }
                endpoint
            }
            None => EndpointUrl::new(environment.endpoint())?,
        };

        let timeout = self
            .options
            .get(TIMEOUT_KEY)
            .map(|value| parse_timeout(value))
            .transpose()?;

        Ok(ApiContext {
            credentials,
            options: self.options,
            environment,
            endpoint,
            timeout,
            request_id: self.request_id,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidConfigOption {
        key: TIMEOUT_KEY.to_string(),
        value: value.to_string(),
        reason: "expected a positive number of seconds",
    };
    let seconds: u64 = value.trim().parse().map_err(|_| invalid())?;
    if seconds == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(seconds))
}
