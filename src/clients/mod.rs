//! HTTP call execution for the billing API.
//!
//! This module provides the layer between resources and the network. It
//! resolves credentials and configuration from an
//! [`ApiContext`](crate::ApiContext), sends one request per call through a
//! [`Transport`], and maps non-success responses to structured errors.
//!
//! # Overview
//!
//! - [`CallExecutor`]: Resolves, sends, and maps a call
//! - [`HttpRequest`]: A call to be made, relative to the context endpoint
//! - [`HttpResponse`]: The raw response (status, headers, body text)
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH)
//! - [`Transport`]: The network seam; [`ReqwestTransport`] is the default
//! - [`HttpError`]: Unified error type for call execution
//!
//! # Example
//!
//! ```rust,ignore
//! use billing_api::clients::{CallExecutor, HttpMethod, HttpRequest};
//!
//! let executor = CallExecutor::with_default_transport()?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/v1/billing/plans/P-5ML4271244454362WXNWU5NQ")
//!     .build()?;
//!
//! let response = executor.execute(request, Some(&context)).await?;
//! println!("{}", response.body);
//! ```
//!
//! # Retry Behavior
//!
//! None. Every call is a single exchange; retries and backoff belong to a
//! custom [`Transport`] if they are wanted.

mod call_executor;
mod errors;
mod http_request;
mod http_response;
mod transport;

pub use call_executor::{CallExecutor, REQUEST_ID_HEADER, SDK_VERSION};
pub use errors::{HttpError, InvalidHttpRequestError, RemoteApiError, TransportError};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, DEBUG_ID_HEADER};
pub use transport::{ReqwestTransport, Transport, TransportRequest};
