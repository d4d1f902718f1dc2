//! Call execution against the billing API.
//!
//! This module provides the [`CallExecutor`] type, which turns an
//! [`HttpRequest`] plus an [`ApiContext`] into a single HTTP exchange and
//! maps its outcome to a body or a structured error.

use crate::clients::errors::{HttpError, RemoteApiError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::clients::TransportError;
use crate::config::{default_context, resolve_context, ApiContext};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the idempotency key of a call.
pub const REQUEST_ID_HEADER: &str = "PayPal-Request-Id";

/// Executes calls against the billing API through a [`Transport`].
///
/// For every call the executor:
/// - resolves the [`ApiContext`] (explicit, else the process-wide default)
/// - builds the URL from the context endpoint, the path, and the query
/// - merges headers, lowest to highest precedence: defaults, authorization,
///   request ID, `http.headers.*` options, caller headers
/// - sends exactly one request; there are no retries and no caching
/// - returns the body on 2xx, or a [`RemoteApiError`] otherwise
///
/// # Thread Safety
///
/// `CallExecutor` is `Send + Sync` when its transport is.
///
/// # Example
///
/// ```rust,ignore
/// use billing_api::clients::CallExecutor;
/// use billing_api::{AccessToken, ApiContext};
///
/// let executor = CallExecutor::with_default_transport()?;
/// let context = ApiContext::builder()
///     .access_token(AccessToken::new("A21AA-token")?)
///     .build()?;
///
/// let body = executor
///     .get("/v1/billing/plans", vec![("page_size".into(), "5".into())], Some(&context))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct CallExecutor<T = ReqwestTransport> {
    transport: T,
}

// Verify CallExecutor is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CallExecutor>();
};

impl CallExecutor<ReqwestTransport> {
    /// Creates an executor over a fresh [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be created.
    pub fn with_default_transport() -> Result<Self, TransportError> {
        Ok(Self::new(ReqwestTransport::new()?))
    }
}

impl<T: Transport> CallExecutor<T> {
    /// Creates an executor over the given transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves a request against a context without sending it.
    #[must_use]
    pub fn prepare(&self, request: &HttpRequest, context: &ApiContext) -> TransportRequest {
        let url = format!("{}{}", context.endpoint(), request.path_and_query());

        let user_agent_prefix = context
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Billing API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut headers = Vec::new();
        set_header(&mut headers, "Accept", "application/json");
        set_header(&mut headers, "User-Agent", &user_agent);
        if request.body.is_some() {
            set_header(&mut headers, "Content-Type", "application/json");
        }
        set_header(
            &mut headers,
            "Authorization",
            &context.credentials().authorization_header(),
        );
        if let Some(request_id) = context.request_id() {
            set_header(&mut headers, REQUEST_ID_HEADER, request_id);
        }
        for (name, value) in context.extra_headers() {
            set_header(&mut headers, name, value);
        }
        if let Some(extra) = &request.extra_headers {
            let mut extra: Vec<_> = extra.iter().collect();
            extra.sort();
            for (name, value) in extra {
                set_header(&mut headers, name, value);
            }
        }

        TransportRequest {
            method: request.http_method,
            url,
            headers,
            body: request.body.clone(),
            timeout: context.timeout(),
        }
    }

    /// Sends a request and returns the successful response.
    ///
    /// When `context` is `None` the process-wide default context is used.
    /// A `204 No Content` response always has an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - no context is available (`Context`)
    /// - request validation fails (`InvalidRequest`)
    /// - the network exchange fails (`Transport`)
    /// - a non-2xx response is received (`Response`)
    pub async fn execute(
        &self,
        request: HttpRequest,
        context: Option<&ApiContext>,
    ) -> Result<HttpResponse, HttpError> {
        let context = resolve_context(context, default_context())?;
        request.verify()?;

        let prepared = self.prepare(&request, context);
        tracing::debug!("Sending {} {}", prepared.method, prepared.url);

        let mut response = self.transport.send(prepared).await?;
        tracing::debug!(
            "Received {} for {} {} (debug id: {})",
            response.code,
            request.http_method,
            request.path,
            response.debug_id().unwrap_or("-")
        );

        if !response.is_ok() {
            tracing::warn!(
                "Billing API call {} {} failed with status {}",
                request.http_method,
                request.path,
                response.code
            );
            return Err(HttpError::Response(RemoteApiError {
                code: response.code,
                body: response.error_body(),
                debug_id: response.debug_id().map(String::from),
            }));
        }

        if response.code == 204 {
            response.body.clear();
        }
        Ok(response)
    }

    /// Sends a GET request and returns the raw body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        context: Option<&ApiContext>,
    ) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(query)
            .build()?;
        Ok(self.execute(request, context).await?.body)
    }

    /// Sends a POST request with a JSON body and returns the raw body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn post(
        &self,
        path: &str,
        body: String,
        context: Option<&ApiContext>,
    ) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .build()?;
        Ok(self.execute(request, context).await?.body)
    }

    /// Sends a PATCH request with a JSON body and returns the raw body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn patch(
        &self,
        path: &str,
        body: String,
        context: Option<&ApiContext>,
    ) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Patch, path)
            .body(body)
            .build()?;
        Ok(self.execute(request, context).await?.body)
    }
}

/// Sets a header, replacing an existing one with the same name in place.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers
        .iter_mut()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
        Some(existing) => existing.1 = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, ClientId, ClientSecret, EndpointUrl};

    fn context() -> ApiContext {
        ApiContext::builder()
            .access_token(AccessToken::new("test-token").unwrap())
            .endpoint(EndpointUrl::new("https://billing.example.com").unwrap())
            .build()
            .unwrap()
    }

    fn executor() -> CallExecutor {
        CallExecutor::with_default_transport().unwrap()
    }

    #[test]
    fn test_prepare_builds_absolute_url() {
        let request = HttpRequest::builder(HttpMethod::Get, "/v1/billing/plans")
            .query_param("page_size", "5")
            .build()
            .unwrap();

        let prepared = executor().prepare(&request, &context());
        assert_eq!(
            prepared.url,
            "https://billing.example.com/v1/billing/plans?page_size=5"
        );
        assert_eq!(prepared.method, HttpMethod::Get);
        assert!(prepared.body.is_none());
    }

    #[test]
    fn test_default_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "/v1/billing/plans")
            .build()
            .unwrap();
        let prepared = executor().prepare(&request, &context());

        assert_eq!(prepared.header("Accept"), Some("application/json"));
        assert_eq!(prepared.header("Authorization"), Some("Bearer test-token"));
        assert!(prepared.header("Content-Type").is_none());
        assert!(prepared.header(REQUEST_ID_HEADER).is_none());

        let user_agent = prepared.header("User-Agent").unwrap();
        assert!(user_agent.contains("Billing API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_body_sets_content_type() {
        let request = HttpRequest::builder(HttpMethod::Post, "/v1/billing/plans")
            .body("{}")
            .build()
            .unwrap();
        let prepared = executor().prepare(&request, &context());

        assert_eq!(prepared.header("content-type"), Some("application/json"));
        assert_eq!(prepared.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_client_credentials_use_basic_auth() {
        let context = ApiContext::builder()
            .client_credentials(
                ClientId::new("client").unwrap(),
                ClientSecret::new("secret").unwrap(),
            )
            .build()
            .unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/v1/billing/plans")
            .build()
            .unwrap();

        let prepared = executor().prepare(&request, &context);
        assert_eq!(
            prepared.header("Authorization"),
            Some("Basic Y2xpZW50OnNlY3JldA==")
        );
        assert!(prepared.url.starts_with("https://api-m.sandbox.paypal.com/"));
    }

    #[test]
    fn test_header_precedence() {
        let context = ApiContext::builder()
            .access_token(AccessToken::new("test-token").unwrap())
            .request_id("context-request-id")
            .header("Accept", "application/vnd.context+json")
            .header("Prefer", "return=minimal")
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/v1/billing/plans")
            .header("prefer", "return=representation")
            .header("PayPal-Request-Id", "caller-request-id")
            .build()
            .unwrap();

        let prepared = executor().prepare(&request, &context);
        assert_eq!(prepared.header("Accept"), Some("application/vnd.context+json"));
        assert_eq!(prepared.header("Prefer"), Some("return=representation"));
        assert_eq!(prepared.header(REQUEST_ID_HEADER), Some("caller-request-id"));
        assert!(prepared
            .header("User-Agent")
            .unwrap()
            .starts_with("MyApp/1.0 | "));

        let prefer_count = prepared
            .headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case("prefer"))
            .count();
        assert_eq!(prefer_count, 1);
    }

    #[test]
    fn test_prepare_carries_context_timeout() {
        let context = ApiContext::builder()
            .access_token(AccessToken::new("test-token").unwrap())
            .config_option("http.ConnectionTimeOut", "12")
            .build()
            .unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/v1/billing/plans")
            .build()
            .unwrap();

        let prepared = executor().prepare(&request, &context);
        assert_eq!(prepared.timeout, Some(std::time::Duration::from_secs(12)));
    }

    #[test]
    fn test_set_header_replaces_in_place() {
        let mut headers = Vec::new();
        set_header(&mut headers, "Accept", "a");
        set_header(&mut headers, "X-Other", "b");
        set_header(&mut headers, "accept", "c");

        assert_eq!(
            headers,
            vec![
                ("Accept".to_string(), "c".to_string()),
                ("X-Other".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_executor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CallExecutor>();
    }
}
