//! Authentication for billing API calls.
//!
//! This module provides the [`Credentials`] an [`ApiContext`](crate::ApiContext)
//! carries and their conversion to an `Authorization` header.
//!
//! # Overview
//!
//! - Client ID and secret are sent as HTTP Basic authorization.
//! - A pre-acquired access token is sent as a Bearer token.
//!
//! Token acquisition and refresh are out of scope; obtain a token elsewhere
//! and pass it in with [`Credentials::AccessToken`].

mod credentials;

pub use credentials::Credentials;
