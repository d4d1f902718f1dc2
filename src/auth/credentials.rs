//! Credentials used to authorize REST API calls.
//!
//! This module provides the [`Credentials`] type held by an
//! [`ApiContext`](crate::ApiContext) and the conversion to an
//! `Authorization` header value.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::{AccessToken, ClientId, ClientSecret};

/// Credentials attached to every call made with a context.
///
/// # Variants
///
/// - `ClientCredentials`: the app's client ID and secret, sent as HTTP Basic
///   authorization.
/// - `AccessToken`: an OAuth access token obtained elsewhere, sent as a
///   Bearer token.
///
/// # Example
///
/// ```rust
/// use billing_api::{AccessToken, Credentials};
///
/// let credentials = Credentials::AccessToken(AccessToken::new("A21AA-token").unwrap());
/// assert_eq!(credentials.authorization_header(), "Bearer A21AA-token");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Client ID and secret pair.
    ClientCredentials {
        /// The REST API client ID.
        client_id: ClientId,
        /// The REST API client secret.
        client_secret: ClientSecret,
    },
    /// A pre-acquired access token.
    AccessToken(AccessToken),
}

impl Credentials {
    /// Creates client credentials from an ID and secret.
    #[must_use]
    pub const fn client_credentials(client_id: ClientId, client_secret: ClientSecret) -> Self {
        Self::ClientCredentials {
            client_id,
            client_secret,
        }
    }

    /// Returns the client ID, if these are client credentials.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        match self {
            Self::ClientCredentials { client_id, .. } => Some(client_id),
            Self::AccessToken(_) => None,
        }
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        match self {
            Self::ClientCredentials {
                client_id,
                client_secret,
            } => {
                let raw = format!("{}:{}", client_id.as_ref(), client_secret.as_ref());
                format!("Basic {}", STANDARD.encode(raw))
            }
            Self::AccessToken(token) => format!("Bearer {}", token.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_credentials_use_basic_auth() {
        let credentials = Credentials::client_credentials(
            ClientId::new("client").unwrap(),
            ClientSecret::new("secret").unwrap(),
        );
        // base64("client:secret")
        assert_eq!(
            credentials.authorization_header(),
            "Basic Y2xpZW50OnNlY3JldA=="
        );
        assert_eq!(credentials.client_id().unwrap().as_ref(), "client");
    }

    #[test]
    fn test_access_token_uses_bearer_auth() {
        let credentials = Credentials::AccessToken(AccessToken::new("token-123").unwrap());
        assert_eq!(credentials.authorization_header(), "Bearer token-123");
        assert!(credentials.client_id().is_none());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let credentials = Credentials::client_credentials(
            ClientId::new("client").unwrap(),
            ClientSecret::new("very-secret").unwrap(),
        );
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("client"));
    }
}
