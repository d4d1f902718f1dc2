//! The network layer behind the [`CallExecutor`](crate::clients::CallExecutor).
//!
//! [`Transport`] is the seam between call execution and the actual HTTP
//! exchange. [`ReqwestTransport`] is the default implementation; tests and
//! callers with special needs (proxies, recording, retries) can supply
//! their own.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;

/// A fully resolved request ready to go on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL, including the query string.
    pub url: String,
    /// Headers in the order they were merged.
    pub headers: Vec<(String, String)>,
    /// The request body, if any.
    pub body: Option<String>,
    /// Timeout for the whole exchange, if configured.
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Returns the value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations must not retry or cache; a non-2xx status is a normal
/// response, and only connectivity failures are errors.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response could be obtained.
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// [`Transport`] backed by a `reqwest` client with rustls.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync` and cheap to clone; clones share the
/// connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a fresh `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the client cannot be created (e.g. TLS
    /// initialization failure).
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
        };

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder.send().await?;
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }
}
