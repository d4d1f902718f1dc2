//! Query parameters for list operations.

use serde::Serialize;
use serde_json::Value;

use crate::model::{json_type_name, MalformedPayloadError};
use crate::validation::Required;

/// Ordered query parameters passed to `all`.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Before a call, parameters are filtered to the resource's allow-list and
/// unknown keys are dropped silently.
///
/// # Example
///
/// ```rust
/// use billing_api::ListParams;
///
/// let params = ListParams::new()
///     .page_size(5)
///     .with("bogus_key", "x");
///
/// let filtered = params.filter_allowed(&["page_size", "page"]);
/// assert_eq!(filtered.get("page_size"), Some("5"));
/// assert!(filtered.get("bogus_key").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pairs: Vec<(String, String)>,
}

impl ListParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Sets a parameter on an owned set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `page_size`.
    #[must_use]
    pub fn page_size(self, size: u32) -> Self {
        self.with("page_size", size.to_string())
    }

    /// Sets `page` (1-based).
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.with("page", page.to_string())
    }

    /// Sets `total_required`.
    #[must_use]
    pub fn total_required(self, required: bool) -> Self {
        self.with("total_required", required.to_string())
    }

    /// Sets `product_id`.
    #[must_use]
    pub fn product_id(self, product_id: impl Into<String>) -> Self {
        self.with("product_id", product_id)
    }

    /// Sets `plan_ids` as a comma-separated list.
    #[must_use]
    pub fn plan_ids<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.with("plan_ids", joined)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the parameters whose keys are in `allowed`, in order.
    #[must_use]
    pub fn filter_allowed(&self, allowed: &[&str]) -> Self {
        Self {
            pairs: self
                .pairs
                .iter()
                .filter(|(k, _)| allowed.contains(&k.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Builds parameters from any serializable struct or map.
    ///
    /// `null` fields are skipped, arrays are comma-joined, and nested
    /// objects are sent as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPayloadError`] if `params` does not serialize to
    /// a JSON object.
    pub fn from_serialize<T: Serialize>(params: &T) -> Result<Self, MalformedPayloadError> {
        let value = serde_json::to_value(params)?;
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(MalformedPayloadError::NotAnObject {
                    found: json_type_name(&other),
                })
            }
        };

        let mut query = Self::new();
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
        Ok(query)
    }

    /// Consumes the set, returning the key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ListParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl Required for ListParams {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}
