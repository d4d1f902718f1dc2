//! Path building for billing resources.
//!
//! Every resource lives under a collection path of the form
//! `/v1/<namespace>/<collection>`; a single record is addressed as
//! `<collection>/<id>`, with the ID percent-encoded.
//!
//! # Example
//!
//! ```rust
//! use billing_api::rest::{item_path, ResourceOperation};
//! use billing_api::clients::HttpMethod;
//!
//! assert_eq!(
//!     item_path("/v1/billing/plans", "P-5ML4271244454362WXNWU5NQ"),
//!     "/v1/billing/plans/P-5ML4271244454362WXNWU5NQ"
//! );
//! assert_eq!(ResourceOperation::Delete.http_method(), HttpMethod::Patch);
//! ```

use crate::clients::HttpMethod;

/// Operations that can be performed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch one record (GET `<collection>/{id}`).
    Get,
    /// List records (GET `<collection>`).
    All,
    /// Create a record (POST `<collection>`).
    Create,
    /// Patch a record (PATCH `<collection>/{id}`).
    Update,
    /// Mark a record deleted (PATCH `<collection>/{id}`).
    Delete,
}

impl ResourceOperation {
    /// Returns the HTTP method used on the wire.
    ///
    /// Delete has no verb of its own; it is a PATCH of the `state` field.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::All => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update | Self::Delete => HttpMethod::Patch,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` if the operation addresses a single record by ID.
    #[must_use]
    pub const fn targets_item(&self) -> bool {
        matches!(self, Self::Get | Self::Update | Self::Delete)
    }
}

/// Returns the path of a single record.
#[must_use]
pub fn item_path(collection: &str, id: &str) -> String {
    format!(
        "{}/{}",
        collection.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Returns the path of a collection, without a trailing slash.
#[must_use]
pub fn collection_path(collection: &str) -> String {
    collection.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_http_methods() {
        assert_eq!(ResourceOperation::Get.http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::All.http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Create.http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Update.http_method(), HttpMethod::Patch);
        assert_eq!(ResourceOperation::Delete.http_method(), HttpMethod::Patch);
    }

    #[test]
    fn test_operation_targets() {
        assert!(ResourceOperation::Get.targets_item());
        assert!(ResourceOperation::Delete.targets_item());
        assert!(!ResourceOperation::All.targets_item());
        assert!(!ResourceOperation::Create.targets_item());
        assert_eq!(ResourceOperation::Update.as_str(), "update");
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(
            item_path("/v1/billing/plans", "P-1"),
            "/v1/billing/plans/P-1"
        );
        assert_eq!(
            item_path("/v1/billing/plans/", "a/b c"),
            "/v1/billing/plans/a%2Fb%20c"
        );
    }

    #[test]
    fn test_collection_path_drops_trailing_slash() {
        assert_eq!(
            collection_path("/v1/catalogs/products/"),
            "/v1/catalogs/products"
        );
    }
}
