//! Paginated list envelopes returned by `all`.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{json_type_name, AttributeBag, JsonCodec, MalformedPayloadError};
use crate::rest::{Resource, ResourceSchema};

/// A HATEOAS link attached to a resource or a list page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
    /// Relation, e.g. `self`, `next`, `edit`.
    pub rel: String,
    /// HTTP method to use with the link, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Link {
    /// Reads the `links` array of a bag, skipping malformed entries.
    #[must_use]
    pub fn from_bag(bag: &AttributeBag) -> Vec<Self> {
        bag.get("links")
            .and_then(Value::as_array)
            .map(|links| {
                links
                    .iter()
                    .filter_map(|link| serde_json::from_value(link.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One page of records plus its envelope.
///
/// Records are read from the schema's list key (for plans, `plans`). The
/// whole envelope is kept, so fields such as `total_items` and `links` stay
/// reachable.
///
/// `ResourceList<S>` implements `Deref<Target = [Resource<S>]>`:
///
/// ```rust
/// use billing_api::{JsonCodec, PlanList};
///
/// let bag = JsonCodec::from_json(
///     r#"{"plans":[{"id":"P-1"},{"id":"P-2"}],"total_items":"2","total_pages":1}"#,
/// ).unwrap();
/// let page = PlanList::from_bag(bag).unwrap();
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page[1].id(), Some("P-2"));
/// assert_eq!(page.total_items(), Some(2));
/// assert!(!page.has_next_page());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceList<S> {
    items: Vec<Resource<S>>,
    envelope: AttributeBag,
}

impl<S: ResourceSchema> ResourceList<S> {
    /// Builds a page from a decoded envelope.
    ///
    /// A missing list key yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError::NotAnObject`] if the list key holds
    /// something other than an array of objects.
    pub fn from_bag(envelope: AttributeBag) -> Result<Self, MalformedPayloadError> {
        let items = match envelope.get(S::LIST_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| JsonCodec::from_value(value.clone()).map(Resource::from_attributes))
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(MalformedPayloadError::NotAnObject {
                    found: json_type_name(other),
                })
            }
        };

        Ok(Self { items, envelope })
    }

    /// Decodes a page from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError`] if the text is not a valid envelope.
    pub fn from_json(text: &str) -> Result<Self, MalformedPayloadError> {
        Self::from_bag(JsonCodec::from_json(text)?)
    }

    /// Returns the records of this page.
    #[must_use]
    pub fn items(&self) -> &[Resource<S>] {
        &self.items
    }

    /// Consumes the page and returns its records.
    #[must_use]
    pub fn into_items(self) -> Vec<Resource<S>> {
        self.items
    }

    /// Returns the raw envelope, including the records.
    #[must_use]
    pub const fn envelope(&self) -> &AttributeBag {
        &self.envelope
    }

    /// Returns `total_items`, present when `total_required` was requested.
    #[must_use]
    pub fn total_items(&self) -> Option<u64> {
        self.envelope.get_u64("total_items")
    }

    /// Returns `total_pages`, present when `total_required` was requested.
    #[must_use]
    pub fn total_pages(&self) -> Option<u64> {
        self.envelope.get_u64("total_pages")
    }

    /// Returns the page links.
    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        Link::from_bag(&self.envelope)
    }

    /// Returns the `next` link, if there is another page.
    #[must_use]
    pub fn next_link(&self) -> Option<Link> {
        self.links().into_iter().find(|link| link.rel == "next")
    }

    /// Returns `true` if the envelope links to a next page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_link().is_some()
    }
}

impl<S> Deref for ResourceList<S> {
    type Target = [Resource<S>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<S> IntoIterator for ResourceList<S> {
    type Item = Resource<S>;
    type IntoIter = std::vec::IntoIter<Resource<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
