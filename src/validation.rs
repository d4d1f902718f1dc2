//! Pre-flight validation of required arguments.
//!
//! Every resource operation checks its required inputs with [`validate`]
//! before any network I/O happens. A failed check never reaches the
//! transport.
//!
//! # Example
//!
//! ```rust
//! use billing_api::validation::validate;
//!
//! assert!(validate("P-123", "id").is_ok());
//!
//! let error = validate("  ", "id").unwrap_err();
//! assert_eq!(error.name, "id");
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::model::{AttributeBag, PatchDocument};

/// A required argument was missing or empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name} cannot be null or empty")]
pub struct InvalidArgumentError {
    /// Name of the offending argument.
    pub name: &'static str,
}

/// Values that can be checked for blankness.
///
/// A value is blank when it is unset, an empty or whitespace-only string, or
/// an empty collection.
pub trait Required {
    /// Returns `true` if the value does not satisfy a required argument.
    fn is_blank(&self) -> bool;
}

impl Required for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Required for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: Required + ?Sized> Required for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Required> Required for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Required::is_blank)
    }
}

impl<T> Required for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Required for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Required for AttributeBag {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Required for PatchDocument {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Required for Value {
    fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_blank(),
            Self::Array(items) => items.is_empty(),
            Self::Object(map) => map.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

/// Fails with [`InvalidArgumentError`] naming `name` if `value` is blank.
///
/// # Errors
///
/// Returns [`InvalidArgumentError`] when [`Required::is_blank`] is `true`.
pub fn validate<T: Required + ?Sized>(
    value: &T,
    name: &'static str,
) -> Result<(), InvalidArgumentError> {
    if value.is_blank() {
        return Err(InvalidArgumentError { name });
    }
    Ok(())
}

/// Unwraps a required optional argument.
///
/// Only absence is rejected; a present but empty value is passed through.
///
/// # Errors
///
/// Returns [`InvalidArgumentError`] naming `name` if `value` is `None`.
pub fn require<T>(value: Option<T>, name: &'static str) -> Result<T, InvalidArgumentError> {
    value.ok_or(InvalidArgumentError { name })
}
