//! API environment definitions.
//!
//! This module provides the [`Environment`] enum that selects which
//! deployment of the REST API requests are sent to.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Base URL of the sandbox deployment.
pub const SANDBOX_ENDPOINT: &str = "https://api-m.sandbox.paypal.com";

/// Base URL of the live deployment.
pub const LIVE_ENDPOINT: &str = "https://api-m.paypal.com";

/// The deployment a context talks to.
///
/// Corresponds to the `mode` configuration option.
///
/// # Example
///
/// ```rust
/// use billing_api::Environment;
///
/// let env: Environment = "live".parse().unwrap();
/// assert_eq!(env, Environment::Live);
/// assert_eq!(env.to_string(), "live");
/// assert_eq!(Environment::default(), Environment::Sandbox);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Test deployment. Used when no mode is configured.
    #[default]
    Sandbox,
    /// Production deployment.
    Live,
}

impl Environment {
    /// Returns the default base URL for this environment.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_ENDPOINT,
            Self::Live => LIVE_ENDPOINT,
        }
    }

    /// Returns `true` for the production deployment.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        })
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" => Ok(Self::Live),
            _ => Err(ConfigError::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
